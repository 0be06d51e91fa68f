//! Typed access to one mapping of the intermediate tree.
//!
//! Every accessor logs into the element-local [`Logger`] instead of failing,
//! so a subtree parser can visit all of its fields and report every problem.
//! Values are read leniently: XML and YAML deliver booleans and numbers as
//! strings, and a list with a single entry may arrive as a bare value.

use crate::logger::Logger;
use crate::model::license::parse_license_field;
use crate::model::{Checksum, ChecksumAlgorithm, LicenseExpression, SpdxEnum, ThreeValued};
use serde_json::{Map, Value};
use std::fmt;

pub(super) struct Fields<'a> {
    map: Option<&'a Map<String, Value>>,
    pub logger: Logger,
}

impl<'a> Fields<'a> {
    pub fn new(value: &'a Value) -> Self {
        let mut logger = Logger::new();
        let map = value.as_object();
        if map.is_none() {
            logger.append(format!("Expected a mapping, but got: {}", describe(value)));
        }
        Self { map, logger }
    }

    /// The raw value; `null` counts as absent.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map
            .and_then(|map| map.get(key))
            .filter(|value| !value.is_null())
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn str(&mut self, key: &str) -> Option<String> {
        let value = self.get(key)?;
        let text = scalar_text(value);
        if text.is_none() {
            self.logger.append(format!(
                "{key} must be a single value, but is: {}",
                describe(value)
            ));
        }
        text
    }

    pub fn required_str(&mut self, key: &str) -> Option<String> {
        if !self.has(key) {
            self.missing(key);
            return None;
        }
        self.str(key)
    }

    pub fn missing(&mut self, key: &str) {
        self.logger
            .append(format!("{key} is required, but was not provided"));
    }

    pub fn bool(&mut self, key: &str) -> Option<bool> {
        let value = self.get(key)?;
        match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
            other => {
                self.logger.append(format!(
                    "{key} must be a boolean value, but is: {}",
                    describe(other)
                ));
                None
            }
        }
    }

    pub fn u64(&mut self, key: &str) -> Option<u64> {
        let value = self.get(key)?;
        let number = match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        if number.is_none() {
            self.logger.append(format!(
                "{key} must be a non-negative integer, but is: {}",
                describe(value)
            ));
        }
        number
    }

    /// List entries; a bare value is a list of one.
    pub fn list(&self, key: &str) -> Vec<&'a Value> {
        match self.get(key) {
            Some(Value::Array(items)) => items.iter().filter(|v| !v.is_null()).collect(),
            Some(single) => vec![single],
            None => Vec::new(),
        }
    }

    pub fn str_list(&mut self, key: &str) -> Vec<String> {
        let mut out = Vec::new();
        for item in self.list(key) {
            match scalar_text(item) {
                Some(text) => out.push(text),
                None => self.logger.append(format!(
                    "{key} entries must be single values, but found: {}",
                    describe(item)
                )),
            }
        }
        out
    }

    /// Converts a string field, logging the conversion error.
    pub fn parse<T, E: fmt::Display>(
        &mut self,
        key: &str,
        convert: impl FnOnce(&str) -> Result<T, E>,
    ) -> Option<T> {
        let raw = self.str(key)?;
        self.check(key, convert(&raw))
    }

    pub fn check<T, E: fmt::Display>(&mut self, key: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.logger
                    .append(format!("Error while parsing {key}: {err}"));
                None
            }
        }
    }

    pub fn three_valued(&mut self, key: &str) -> Option<ThreeValued<String>> {
        self.str(key).map(|raw| ThreeValued::parse_str(&raw))
    }

    pub fn enumeration<E: SpdxEnum>(&mut self, key: &str) -> Option<E> {
        self.parse(key, |raw| {
            E::parse_name(raw).ok_or_else(|| format!("Invalid value {raw}"))
        })
    }

    pub fn license(&mut self, key: &str) -> Option<ThreeValued<LicenseExpression>> {
        self.parse(key, parse_license_field)
    }

    pub fn license_list(&mut self, key: &str) -> Vec<ThreeValued<LicenseExpression>> {
        let raw = self.str_list(key);
        raw.iter()
            .filter_map(|item| self.check(key, parse_license_field(item)))
            .collect()
    }

    pub fn checksums(&mut self, key: &str) -> Vec<Checksum> {
        let mut out = Vec::new();
        for item in self.list(key) {
            match parse_checksum(item) {
                Ok(checksum) => out.push(checksum),
                Err(local) => self.logger.append_element("Checksum", local),
            }
        }
        out
    }

    /// Moves the local messages of a nested parser into this logger.
    pub fn nested(&mut self, class_name: &str, local: Logger) {
        self.logger.append_element(class_name, local);
    }

    /// Returns the element if nothing was logged, the messages otherwise.
    pub fn finish<T>(self, element: Option<T>) -> Result<T, Logger> {
        match element {
            Some(element) if !self.logger.has_messages() => Ok(element),
            _ => Err(self.logger),
        }
    }
}

pub(super) fn parse_checksum(value: &Value) -> Result<Checksum, Logger> {
    let mut fields = Fields::new(value);
    let algorithm = match fields.required_str("algorithm") {
        Some(raw) => fields.check("algorithm", raw.parse::<ChecksumAlgorithm>()),
        None => None,
    };
    let checksum_value = fields.required_str("checksumValue");
    let checksum = algorithm
        .zip(checksum_value)
        .map(|(algorithm, value)| Checksum::new(algorithm, value));
    fields.finish(checksum)
}

/// Text of a string, number or boolean.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Array(_) => "a list".to_string(),
        Value::Object(_) => "a mapping".to_string(),
        other => other.to_string(),
    }
}
