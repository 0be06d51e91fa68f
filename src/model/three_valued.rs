//! The `NOASSERTION` / `NONE` / concrete value tri-state.
//!
//! Almost every provenance and licensing field in SPDX 2 may carry one of the
//! two literal tokens instead of a real value. [`ThreeValued`] keeps the
//! distinction typed so consumers never compare against sentinel strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal written for [`ThreeValued::NoAssertion`] in every wire format.
pub const NOASSERTION: &str = "NOASSERTION";
/// Literal written for [`ThreeValued::None`] in every wire format.
pub const NONE: &str = "NONE";

/// A field value that is either concrete, explicitly unasserted, or explicitly empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThreeValued<T> {
    /// A concrete value of the field's base type.
    Value(T),
    /// The creator makes no assertion about the field.
    NoAssertion,
    /// The creator asserts that no value exists.
    None,
}

impl<T> ThreeValued<T> {
    /// Returns the concrete value, if any.
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::NoAssertion | Self::None => None,
        }
    }

    /// Consumes the tri-state and returns the concrete value, if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::NoAssertion | Self::None => None,
        }
    }

    #[must_use]
    pub const fn is_no_assertion(&self) -> bool {
        matches!(self, Self::NoAssertion)
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Borrowing view of the tri-state.
    pub const fn as_ref(&self) -> ThreeValued<&T> {
        match self {
            Self::Value(v) => ThreeValued::Value(v),
            Self::NoAssertion => ThreeValued::NoAssertion,
            Self::None => ThreeValued::None,
        }
    }

    /// Maps the concrete value, keeping the singletons untouched.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ThreeValued<U> {
        match self {
            Self::Value(v) => ThreeValued::Value(f(v)),
            Self::NoAssertion => ThreeValued::NoAssertion,
            Self::None => ThreeValued::None,
        }
    }

    /// Fallible map of the concrete value.
    pub fn try_map<U, E, F: FnOnce(T) -> Result<U, E>>(self, f: F) -> Result<ThreeValued<U>, E> {
        Ok(match self {
            Self::Value(v) => ThreeValued::Value(f(v)?),
            Self::NoAssertion => ThreeValued::NoAssertion,
            Self::None => ThreeValued::None,
        })
    }

    /// Returns the literal token for the singletons, `None` for concrete values.
    pub const fn literal(&self) -> Option<&'static str> {
        match self {
            Self::Value(_) => Option::None,
            Self::NoAssertion => Some(NOASSERTION),
            Self::None => Some(NONE),
        }
    }
}

impl ThreeValued<String> {
    /// Parses a raw string, mapping the literal tokens to singletons eagerly.
    pub fn parse_str(raw: &str) -> Self {
        Self::parse_with(raw, |s| Ok::<_, std::convert::Infallible>(s.to_string()))
            .unwrap_or(Self::NoAssertion)
    }
}

impl<T> ThreeValued<T> {
    /// Parses a raw string with `parse` unless it is one of the literal tokens.
    pub fn parse_with<E, F: FnOnce(&str) -> Result<T, E>>(raw: &str, parse: F) -> Result<Self, E> {
        match raw.trim() {
            NOASSERTION => Ok(Self::NoAssertion),
            NONE => Ok(Self::None),
            other => parse(other).map(Self::Value),
        }
    }
}

impl<T> From<T> for ThreeValued<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: fmt::Display> fmt::Display for ThreeValued<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::NoAssertion => f.write_str(NOASSERTION),
            Self::None => f.write_str(NONE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals_parse_to_singletons() {
        assert_eq!(ThreeValued::parse_str("NOASSERTION"), ThreeValued::NoAssertion);
        assert_eq!(ThreeValued::parse_str(" NONE "), ThreeValued::None);
        assert_eq!(
            ThreeValued::parse_str("https://example.com"),
            ThreeValued::Value("https://example.com".to_string())
        );
    }

    #[test]
    fn test_display_uses_literal_tokens() {
        let no_assertion: ThreeValued<String> = ThreeValued::NoAssertion;
        let none: ThreeValued<String> = ThreeValued::None;
        assert_eq!(no_assertion.to_string(), "NOASSERTION");
        assert_eq!(none.to_string(), "NONE");
        assert_eq!(ThreeValued::Value(3).to_string(), "3");
    }

    #[test]
    fn test_lowercase_tokens_are_values() {
        // Only the exact upper-case tokens are reserved.
        assert_eq!(
            ThreeValued::parse_str("none"),
            ThreeValued::Value("none".to_string())
        );
    }

    #[test]
    fn test_try_map_propagates_errors() {
        let parsed: Result<ThreeValued<u32>, _> =
            ThreeValued::parse_with("12", |s| s.parse::<u32>());
        assert_eq!(parsed.unwrap(), ThreeValued::Value(12));
        let failed: Result<ThreeValued<u32>, _> =
            ThreeValued::parse_with("x", |s| s.parse::<u32>());
        assert!(failed.is_err());
        let singleton: Result<ThreeValued<u32>, _> =
            ThreeValued::parse_with("NONE", |s| s.parse::<u32>());
        assert_eq!(singleton.unwrap(), ThreeValued::None);
    }
}
