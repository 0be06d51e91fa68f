//! A minimal in-memory triple store.
//!
//! Triples keep the order in which the reader produced them, so list-like
//! properties (license set members, ranges, relationships) come back in
//! document order.

use std::collections::HashMap;
use std::fmt;

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const SPDX_NS: &str = "http://spdx.org/rdf/terms#";
pub const POINTER_NS: &str = "http://www.w3.org/2009/pointers#";
/// Alternative pointer namespace, read as [`POINTER_NS`].
pub const SPDX_POINTER_NS: &str = "http://spdx.org/rdf/terms/pointer#";
pub const DOAP_NS: &str = "http://usefulinc.com/ns/doap#";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";
/// Base of listed license and exception URIs.
pub const LICENSES_NS: &str = "http://spdx.org/licenses/";
/// Base of listed external reference types, e.g. `.../references/purl`.
pub const REFERENCES_NS: &str = "http://spdx.org/rdf/references/";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
pub const RDFS_SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";
pub const DOAP_HOMEPAGE: &str = "http://usefulinc.com/ns/doap#homepage";

/// `spdx:noassertion`
pub const NOASSERTION_URI: &str = "http://spdx.org/rdf/terms#noassertion";
/// `spdx:none`
pub const NONE_URI: &str = "http://spdx.org/rdf/terms#none";

/// Full IRI of a term in the SPDX vocabulary.
#[must_use]
pub fn spdx(local: &str) -> String {
    format!("{SPDX_NS}{local}")
}

/// Full IRI of a term in the pointer vocabulary.
#[must_use]
pub fn pointer(local: &str) -> String {
    format!("{POINTER_NS}{local}")
}

/// The part of an IRI after the last `#` or `/`.
#[must_use]
pub fn local_name(iri: &str) -> &str {
    iri.rfind(['#', '/']).map_or(iri, |idx| &iri[idx + 1..])
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Iri(String),
    Blank(String),
    Literal(String),
}

impl Term {
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "<{iri}>"),
            Self::Blank(id) => write!(f, "_:{id}"),
            Self::Literal(text) => write!(f, "\"{text}\""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
}

#[derive(Debug, Default, Clone)]
pub struct Graph {
    triples: Vec<Triple>,
    by_subject: HashMap<Term, Vec<usize>>,
}

impl Graph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, subject: Term, predicate: impl Into<String>, object: Term) {
        self.by_subject
            .entry(subject.clone())
            .or_default()
            .push(self.triples.len());
        self.triples.push(Triple {
            subject,
            predicate: predicate.into(),
            object,
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    fn about(&self, subject: &Term) -> impl Iterator<Item = &Triple> {
        self.by_subject
            .get(subject)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&idx| &self.triples[idx])
    }

    /// Objects of `subject predicate ?o`, in insertion order.
    #[must_use]
    pub fn objects(&self, subject: &Term, predicate: &str) -> Vec<&Term> {
        self.about(subject)
            .filter(|triple| triple.predicate == predicate)
            .map(|triple| &triple.object)
            .collect()
    }

    #[must_use]
    pub fn object(&self, subject: &Term, predicate: &str) -> Option<&Term> {
        self.about(subject)
            .find(|triple| triple.predicate == predicate)
            .map(|triple| &triple.object)
    }

    /// Every triple with the given predicate.
    #[must_use]
    pub fn with_predicate(&self, predicate: &str) -> Vec<&Triple> {
        self.triples
            .iter()
            .filter(|triple| triple.predicate == predicate)
            .collect()
    }

    /// Distinct subjects typed as `class`, in order of first appearance.
    #[must_use]
    pub fn subjects_of_type(&self, class: &str) -> Vec<&Term> {
        let mut subjects: Vec<&Term> = Vec::new();
        for triple in self.with_predicate(RDF_TYPE) {
            if triple.object.as_iri() == Some(class) && !subjects.contains(&&triple.subject) {
                subjects.push(&triple.subject);
            }
        }
        subjects
    }

    /// The first `rdf:type` of `subject`.
    #[must_use]
    pub fn type_of(&self, subject: &Term) -> Option<&str> {
        self.object(subject, RDF_TYPE).and_then(Term::as_iri)
    }

    #[must_use]
    pub fn has_subject(&self, subject: &Term) -> bool {
        self.by_subject.contains_key(subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(value: &str) -> Term {
        Term::Iri(value.to_string())
    }

    #[test]
    fn test_objects_keep_insertion_order() {
        let mut graph = Graph::new();
        let set = Term::Blank("b0".to_string());
        graph.insert(set.clone(), spdx("member"), iri("http://spdx.org/licenses/MIT"));
        graph.insert(set.clone(), RDF_TYPE, iri(&spdx("ConjunctiveLicenseSet")));
        graph.insert(set.clone(), spdx("member"), iri("http://spdx.org/licenses/0BSD"));

        let members = graph.objects(&set, &spdx("member"));
        assert_eq!(
            members,
            [
                &iri("http://spdx.org/licenses/MIT"),
                &iri("http://spdx.org/licenses/0BSD")
            ]
        );
        assert_eq!(graph.type_of(&set), Some(spdx("ConjunctiveLicenseSet").as_str()));
    }

    #[test]
    fn test_subjects_of_type_are_distinct() {
        let mut graph = Graph::new();
        let package = iri("https://x/y#SPDXRef-P");
        graph.insert(package.clone(), RDF_TYPE, iri(&spdx("Package")));
        graph.insert(package.clone(), RDF_TYPE, iri(&spdx("Package")));
        assert_eq!(graph.subjects_of_type(&spdx("Package")), [&package]);
        assert!(graph.subjects_of_type(&spdx("File")).is_empty());
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name("http://spdx.org/rdf/terms#Package"), "Package");
        assert_eq!(local_name("http://spdx.org/licenses/MIT"), "MIT");
        assert_eq!(local_name("plain"), "plain");
    }
}
