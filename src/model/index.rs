//! Index structures for spdx_id lookups.
//!
//! Cross references in a document are plain `spdx_id` strings. The validator
//! and the SPDX 3 bump resolve many of them, so [`SpdxElementIndex`] is built
//! once per document and answers lookups in O(1).
//!
//! ```ignore
//! use spdx_tools::model::SpdxElementIndex;
//!
//! let index = SpdxElementIndex::build(&document);
//! if let Some(element) = index.get(&document, "SPDXRef-Package") {
//!     println!("{}", element.kind());
//! }
//! ```

use super::{Document, ElementKind, File, Package, RelationshipType, Snippet};
use std::collections::HashMap;

/// Borrowed view of an element found by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRef<'a> {
    Package(&'a Package),
    File(&'a File),
    Snippet(&'a Snippet),
}

impl ElementRef<'_> {
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        match self {
            Self::Package(_) => ElementKind::Package,
            Self::File(_) => ElementKind::File,
            Self::Snippet(_) => ElementKind::Snippet,
        }
    }

    #[must_use]
    pub fn spdx_id(&self) -> &str {
        match self {
            Self::Package(p) => &p.spdx_id,
            Self::File(f) => &f.spdx_id,
            Self::Snippet(s) => &s.spdx_id,
        }
    }
}

/// Position of an element inside its document list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementSlot {
    pub kind: ElementKind,
    pub position: usize,
}

/// Precomputed id index for one document.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct SpdxElementIndex {
    /// First occurrence of each id
    slots: HashMap<String, ElementSlot>,
    /// Ids seen more than once, in order of their second occurrence
    duplicates: Vec<String>,
    /// Edge indices by source id
    relationships_by_source: HashMap<String, Vec<usize>>,
}

impl SpdxElementIndex {
    /// Build an index over the document, its packages, files and snippets.
    pub fn build(document: &Document) -> Self {
        let mut index = Self::default();
        index.insert(document.spdx_id(), ElementKind::Document, 0);
        for (position, package) in document.packages.iter().enumerate() {
            index.insert(&package.spdx_id, ElementKind::Package, position);
        }
        for (position, file) in document.files.iter().enumerate() {
            index.insert(&file.spdx_id, ElementKind::File, position);
        }
        for (position, snippet) in document.snippets.iter().enumerate() {
            index.insert(&snippet.spdx_id, ElementKind::Snippet, position);
        }
        for (position, relationship) in document.relationships.iter().enumerate() {
            index
                .relationships_by_source
                .entry(relationship.spdx_element_id.clone())
                .or_default()
                .push(position);
        }
        index
    }

    fn insert(&mut self, spdx_id: &str, kind: ElementKind, position: usize) {
        if self.slots.contains_key(spdx_id) {
            if !self.duplicates.iter().any(|d| d == spdx_id) {
                self.duplicates.push(spdx_id.to_string());
            }
            return;
        }
        self.slots
            .insert(spdx_id.to_string(), ElementSlot { kind, position });
    }

    #[must_use]
    pub fn contains(&self, spdx_id: &str) -> bool {
        self.slots.contains_key(spdx_id)
    }

    #[must_use]
    pub fn slot(&self, spdx_id: &str) -> Option<ElementSlot> {
        self.slots.get(spdx_id).copied()
    }

    #[must_use]
    pub fn kind_of(&self, spdx_id: &str) -> Option<ElementKind> {
        self.slot(spdx_id).map(|slot| slot.kind)
    }

    /// Resolves an id to its package, file or snippet.
    #[must_use]
    pub fn get<'a>(&self, document: &'a Document, spdx_id: &str) -> Option<ElementRef<'a>> {
        let slot = self.slot(spdx_id)?;
        match slot.kind {
            ElementKind::Package => document.packages.get(slot.position).map(ElementRef::Package),
            ElementKind::File => document.files.get(slot.position).map(ElementRef::File),
            ElementKind::Snippet => document.snippets.get(slot.position).map(ElementRef::Snippet),
            _ => None,
        }
    }

    /// Ids that occur more than once across the document.
    #[must_use]
    pub fn duplicate_ids(&self) -> &[String] {
        &self.duplicates
    }

    /// Indices into `document.relationships` whose source is `spdx_id`.
    #[must_use]
    pub fn relationships_from(&self, spdx_id: &str) -> &[usize] {
        self.relationships_by_source
            .get(spdx_id)
            .map_or(&[][..], Vec::as_slice)
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.slots.len()
    }
}

/// One-off lookup without keeping an index around.
#[must_use]
pub fn get_element_from_spdx_id<'a>(document: &'a Document, spdx_id: &str) -> Option<ElementRef<'a>> {
    document
        .packages
        .iter()
        .find(|p| p.spdx_id == spdx_id)
        .map(ElementRef::Package)
        .or_else(|| {
            document
                .files
                .iter()
                .find(|f| f.spdx_id == spdx_id)
                .map(ElementRef::File)
        })
        .or_else(|| {
            document
                .snippets
                .iter()
                .find(|s| s.spdx_id == spdx_id)
                .map(ElementRef::Snippet)
        })
}

/// Ids contained by `package_id` through `CONTAINS` or `CONTAINED_BY`, in
/// relationship order and without repetition.
#[must_use]
pub fn get_contained_spdx_element_ids<'a>(document: &'a Document, package_id: &str) -> Vec<&'a str> {
    let mut ids: Vec<&'a str> = Vec::new();
    for relationship in &document.relationships {
        let contained = match relationship.relationship_type {
            RelationshipType::Contains if relationship.spdx_element_id == package_id => {
                relationship.related_spdx_element_id.value().map(String::as_str)
            }
            RelationshipType::ContainedBy
                if relationship.related_spdx_element_id.value().map(String::as_str)
                    == Some(package_id) =>
            {
                Some(relationship.spdx_element_id.as_str())
            }
            _ => None,
        };
        if let Some(id) = contained {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        datetime::parse_datetime, Actor, CreationInfo, Relationship, ThreeValued,
    };

    fn document() -> Document {
        let mut doc = Document::new(CreationInfo::new(
            "SPDX-2.3",
            "SPDXRef-DOCUMENT",
            "Doc",
            "https://x/y",
            vec![Actor::tool("t").unwrap()],
            parse_datetime("2022-12-01T00:00:00Z").unwrap(),
        ));
        doc.packages
            .push(Package::new("SPDXRef-P", "p", ThreeValued::NoAssertion));
        doc.files.push(File::new("./a", "SPDXRef-F1", vec![]));
        doc.files.push(File::new("./b", "SPDXRef-F2", vec![]));
        doc.relationships.push(Relationship::new(
            "SPDXRef-P",
            RelationshipType::Contains,
            ThreeValued::Value("SPDXRef-F1".to_string()),
        ));
        doc.relationships.push(Relationship::new(
            "SPDXRef-F2",
            RelationshipType::ContainedBy,
            ThreeValued::Value("SPDXRef-P".to_string()),
        ));
        doc
    }

    #[test]
    fn test_lookup() {
        let doc = document();
        let index = SpdxElementIndex::build(&doc);
        assert_eq!(index.kind_of("SPDXRef-DOCUMENT"), Some(ElementKind::Document));
        assert_eq!(
            index.get(&doc, "SPDXRef-F2").map(|e| e.kind()),
            Some(ElementKind::File)
        );
        assert!(index.get(&doc, "SPDXRef-missing").is_none());
        assert_eq!(index.relationships_from("SPDXRef-P"), &[0]);
        assert_eq!(
            get_element_from_spdx_id(&doc, "SPDXRef-P").map(|e| e.spdx_id().to_string()),
            Some("SPDXRef-P".to_string())
        );
    }

    #[test]
    fn test_duplicates() {
        let mut doc = document();
        doc.snippets
            .push(Snippet::new("SPDXRef-F1", "SPDXRef-F1", (1, 2)));
        let index = SpdxElementIndex::build(&doc);
        assert_eq!(index.duplicate_ids(), &["SPDXRef-F1".to_string()]);
    }

    #[test]
    fn test_contained_ids_both_directions() {
        let doc = document();
        assert_eq!(
            get_contained_spdx_element_ids(&doc, "SPDXRef-P"),
            vec!["SPDXRef-F1", "SPDXRef-F2"]
        );
    }
}
