//! Typed access to the properties of one RDF node.

use super::graph::{
    local_name, spdx, Graph, Term, LICENSES_NS, NOASSERTION_URI, NONE_URI,
};
use super::license::parse_license_term;
use crate::logger::Logger;
use crate::model::{
    Checksum, ChecksumAlgorithm, ExternalDocumentRef, LicenseExpression, SpdxEnum, ThreeValued,
};
use std::fmt;

/// Maps element URIs to SPDX ids and back.
///
/// `<namespace>#SPDXRef-X` is the local id `SPDXRef-X`; a URI under the
/// document of an external document reference becomes
/// `DocumentRef-Y:SPDXRef-X`.
#[derive(Debug, Clone)]
pub struct IdResolver {
    namespace: String,
    external: Vec<(String, String)>,
}

impl IdResolver {
    pub fn new(namespace: impl Into<String>, external_refs: &[ExternalDocumentRef]) -> Self {
        Self {
            namespace: namespace.into(),
            external: external_refs
                .iter()
                .map(|r| (r.document_ref_id.clone(), r.document_uri.clone()))
                .collect(),
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn to_spdx_id(&self, uri: &str) -> String {
        let Some((base, fragment)) = uri.rsplit_once('#') else {
            return uri.to_string();
        };
        if base == self.namespace {
            return fragment.to_string();
        }
        match self.external.iter().find(|(_, document_uri)| document_uri == base) {
            Some((ref_id, _)) => format!("{ref_id}:{fragment}"),
            None => uri.to_string(),
        }
    }

    #[must_use]
    pub fn to_uri(&self, spdx_id: &str) -> String {
        if let Some((ref_id, local)) = spdx_id.split_once(':') {
            if let Some((_, document_uri)) = self.external.iter().find(|(id, _)| id == ref_id) {
                return format!("{document_uri}#{local}");
            }
        }
        format!("{}#{spdx_id}", self.namespace)
    }

    /// License id of a license URI: listed licenses drop the license list
    /// base, custom ones resolve like element ids.
    #[must_use]
    pub fn license_id(&self, uri: &str) -> String {
        match uri.strip_prefix(LICENSES_NS) {
            Some(listed) => listed.to_string(),
            None => self.to_spdx_id(uri),
        }
    }
}

pub(super) struct Properties<'g> {
    pub graph: &'g Graph,
    pub subject: &'g Term,
    pub ids: &'g IdResolver,
    pub logger: Logger,
}

impl<'g> Properties<'g> {
    pub fn new(graph: &'g Graph, subject: &'g Term, ids: &'g IdResolver) -> Self {
        Self {
            graph,
            subject,
            ids,
            logger: Logger::new(),
        }
    }

    pub fn object(&self, predicate: &str) -> Option<&'g Term> {
        self.graph.object(self.subject, predicate)
    }

    pub fn objects(&self, predicate: &str) -> Vec<&'g Term> {
        self.graph.objects(self.subject, predicate)
    }

    /// Text of a literal property. IRIs are accepted as their text.
    pub fn literal(&mut self, predicate: &str) -> Option<String> {
        let objects = self.objects(predicate);
        if objects.len() > 1 {
            self.logger.append(format!(
                "{} must be a single value, but has {} values",
                local_name(predicate),
                objects.len()
            ));
        }
        match objects.first()? {
            Term::Literal(text) | Term::Iri(text) => Some(text.clone()),
            Term::Blank(_) => {
                self.logger.append(format!(
                    "{} must be a literal, but is a blank node",
                    local_name(predicate)
                ));
                None
            }
        }
    }

    pub fn required_literal(&mut self, predicate: &str) -> Option<String> {
        if self.object(predicate).is_none() {
            self.missing(predicate);
            return None;
        }
        self.literal(predicate)
    }

    pub fn missing(&mut self, predicate: &str) {
        self.logger.append(format!(
            "{} is required, but was not provided",
            local_name(predicate)
        ));
    }

    pub fn literals(&mut self, predicate: &str) -> Vec<String> {
        let mut out = Vec::new();
        for object in self.objects(predicate) {
            match object {
                Term::Literal(text) | Term::Iri(text) => out.push(text.clone()),
                Term::Blank(_) => self.logger.append(format!(
                    "{} entries must be literals",
                    local_name(predicate)
                )),
            }
        }
        out
    }

    pub fn bool(&mut self, predicate: &str) -> Option<bool> {
        let raw = self.literal(predicate)?;
        match raw.trim() {
            t if t.eq_ignore_ascii_case("true") => Some(true),
            t if t.eq_ignore_ascii_case("false") => Some(false),
            other => {
                self.logger.append(format!(
                    "{} must be a boolean value, but is: {other}",
                    local_name(predicate)
                ));
                None
            }
        }
    }

    pub fn parse<T, E: fmt::Display>(
        &mut self,
        predicate: &str,
        convert: impl FnOnce(&str) -> Result<T, E>,
    ) -> Option<T> {
        let raw = self.literal(predicate)?;
        self.check(predicate, convert(&raw))
    }

    pub fn check<T, E: fmt::Display>(&mut self, predicate: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.logger
                    .append(format!("Error while parsing {}: {err}", local_name(predicate)));
                None
            }
        }
    }

    /// `spdx:noassertion` / `spdx:none` resources or the literal spellings.
    pub fn three_valued(&mut self, predicate: &str) -> Option<ThreeValued<String>> {
        match self.object(predicate)? {
            Term::Iri(uri) if uri == NOASSERTION_URI => Some(ThreeValued::NoAssertion),
            Term::Iri(uri) if uri == NONE_URI => Some(ThreeValued::None),
            _ => self.literal(predicate).map(|raw| ThreeValued::parse_str(&raw)),
        }
    }

    /// An element reference, resolved to its SPDX id.
    pub fn reference(&mut self, predicate: &str) -> Option<String> {
        match self.object(predicate)? {
            Term::Iri(uri) => Some(self.ids.to_spdx_id(uri)),
            Term::Literal(text) => Some(text.clone()),
            Term::Blank(_) => {
                self.logger.append(format!(
                    "{} must reference an element with a URI",
                    local_name(predicate)
                ));
                None
            }
        }
    }

    /// An enum individual such as `spdx:relationshipType_contains`.
    pub fn enumeration<E: SpdxEnum>(&mut self, predicate: &str) -> Option<E> {
        let object = self.object(predicate)?;
        let parsed = match object {
            Term::Iri(uri) => E::from_rdf_fragment(local_name(uri)),
            Term::Literal(text) => E::from_rdf_fragment(text).or_else(|| E::parse_name(text)),
            Term::Blank(_) => None,
        };
        if parsed.is_none() {
            self.logger.append(format!(
                "Invalid value for {}: {object}",
                local_name(predicate)
            ));
        }
        parsed
    }

    pub fn enumerations<E: SpdxEnum>(&mut self, predicate: &str) -> Vec<E> {
        let mut out = Vec::new();
        for object in self.objects(predicate) {
            let parsed = match object {
                Term::Iri(uri) => E::from_rdf_fragment(local_name(uri)),
                _ => None,
            };
            match parsed {
                Some(value) => out.push(value),
                None => self.logger.append(format!(
                    "Invalid value for {}: {object}",
                    local_name(predicate)
                )),
            }
        }
        out
    }

    pub fn license(&mut self, predicate: &str) -> Option<ThreeValued<LicenseExpression>> {
        let term = self.object(predicate)?;
        let result = parse_license_term(self.graph, term, self.ids);
        self.check(predicate, result)
    }

    pub fn license_list(&mut self, predicate: &str) -> Vec<ThreeValued<LicenseExpression>> {
        let mut out = Vec::new();
        for term in self.objects(predicate) {
            let result = parse_license_term(self.graph, term, self.ids);
            if let Some(license) = self.check(predicate, result) {
                out.push(license);
            }
        }
        out
    }

    pub fn checksums(&mut self, predicate: &str) -> Vec<Checksum> {
        let mut out = Vec::new();
        for node in self.objects(predicate) {
            match parse_checksum(self.graph, node, self.ids) {
                Ok(checksum) => out.push(checksum),
                Err(local) => self.logger.append_element("Checksum", local),
            }
        }
        out
    }

    pub fn nested(&mut self, class_name: &str, local: Logger) {
        self.logger.append_element(class_name, local);
    }

    pub fn finish<T>(self, element: Option<T>) -> Result<T, Logger> {
        match element {
            Some(element) if !self.logger.has_messages() => Ok(element),
            _ => Err(self.logger),
        }
    }
}

pub(super) fn parse_checksum(graph: &Graph, node: &Term, ids: &IdResolver) -> Result<Checksum, Logger> {
    let mut props = Properties::new(graph, node, ids);
    let algorithm = match props.object(&spdx("algorithm")) {
        Some(Term::Iri(uri)) => {
            let parsed = ChecksumAlgorithm::from_rdf_fragment(local_name(uri));
            if parsed.is_none() {
                props
                    .logger
                    .append(format!("Invalid value for algorithm: {uri}"));
            }
            parsed
        }
        Some(_) => props.parse(&spdx("algorithm"), str::parse::<ChecksumAlgorithm>),
        None => {
            props.missing(&spdx("algorithm"));
            None
        }
    };
    let value = props.required_literal(&spdx("checksumValue"));
    let checksum = algorithm
        .zip(value)
        .map(|(algorithm, value)| Checksum::new(algorithm, value));
    props.finish(checksum)
}
