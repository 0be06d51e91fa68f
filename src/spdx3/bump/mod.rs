//! SPDX 2 → SPDX 3 conversion.
//!
//! The document tree is flattened into a [`Payload`]. Every SPDX 2 id is
//! qualified with the document namespace (`<ns>#SPDXRef-…`), or with the
//! URI of the external document for `DocumentRef-X:` ids. Actors and license
//! expressions are interned so repeated occurrences share one element.
//!
//! Relationships are collected first and merged before they are added to the
//! payload; the `SpdxDocument` element list is filled in last.
//!
//! Anything without an SPDX 3 counterpart is reported as a warning in the
//! [`BumpResult`] rather than failing the conversion.

mod actor;
mod annotation;
mod checksum;
mod creation_info;
mod element;
mod external_ref;
mod license;
mod relationship;

pub use relationship::{relationship_rule, RelationshipRule};

use crate::model::Document;
use crate::spdx3::model::{CreationInfo, Element, Payload};
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BumpOptions {
    /// Emit every conversion warning through `tracing` as well
    pub log_warnings: bool,
}

impl Default for BumpOptions {
    fn default() -> Self {
        Self { log_warnings: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpResult {
    pub payload: Payload,
    /// Fields and relationships that could not be converted
    pub warnings: Vec<String>,
}

/// Converts `document` with default options.
#[must_use]
pub fn bump_document(document: &Document) -> BumpResult {
    bump_document_with(document, BumpOptions::default())
}

#[must_use]
pub fn bump_document_with(document: &Document, options: BumpOptions) -> BumpResult {
    let mut bumper = Bumper::new(document, options);
    let document_id = bumper.bump_creation_info();
    for package in &document.packages {
        bumper.bump_package(package);
    }
    for file in &document.files {
        bumper.bump_file(file);
    }
    for snippet in &document.snippets {
        bumper.bump_snippet(snippet);
    }
    for info in &document.extracted_licensing_info {
        bumper.bump_extracted_licensing_info(info);
    }
    for relationship in &document.relationships {
        bumper.bump_relationship(relationship);
    }
    for annotation in &document.annotations {
        bumper.bump_annotation(annotation);
    }
    bumper.finish(&document_id)
}

/// Conversion state for one document.
struct Bumper<'a> {
    document: &'a Document,
    namespace: String,
    /// `DocumentRef-X` prefix and the namespace it stands for, `<uri>#`
    external_namespaces: Vec<(String, String)>,
    creation_info: CreationInfo,
    payload: Payload,
    /// Pending relationships, merged in [`Bumper::finish`]
    relationships: Vec<Element>,
    license_ids: HashMap<String, String>,
    relationship_count: usize,
    annotation_count: usize,
    warnings: Vec<String>,
    options: BumpOptions,
}

impl<'a> Bumper<'a> {
    fn new(document: &'a Document, options: BumpOptions) -> Self {
        let info = &document.creation_info;
        Self {
            document,
            namespace: info.document_namespace.clone(),
            external_namespaces: info
                .external_document_refs
                .iter()
                .map(|external| {
                    (
                        external.document_ref_id.clone(),
                        format!("{}#", external.document_uri),
                    )
                })
                .collect(),
            creation_info: CreationInfo::new(info.created, info.data_license.clone()),
            payload: Payload::new(),
            relationships: Vec::new(),
            license_ids: HashMap::new(),
            relationship_count: 0,
            annotation_count: 0,
            warnings: Vec::new(),
            options,
        }
    }

    /// Qualifies an SPDX 2 id: `<ns>#SPDXRef-X`, or `<uri>#SPDXRef-Y` for
    /// `DocumentRef-X:SPDXRef-Y`.
    fn element_id(&self, spdx2_id: &str) -> String {
        if let Some((prefix, local)) = spdx2_id.split_once(':') {
            if let Some((_, namespace)) = self
                .external_namespaces
                .iter()
                .find(|(document_ref, _)| document_ref == prefix)
            {
                return format!("{namespace}{local}");
            }
        }
        format!("{}#{spdx2_id}", self.namespace)
    }

    fn next_relationship_id(&mut self) -> String {
        self.relationship_count += 1;
        format!("{}#SPDXRef-Relationship-{}", self.namespace, self.relationship_count)
    }

    fn warn(&mut self, message: String) {
        if self.options.log_warnings {
            warn!("{message}");
        }
        self.warnings.push(message);
    }

    fn missing_conversion(&mut self, field: &str, reason: &str) {
        self.warn(format!("Missing conversion for {field}: {reason}"));
    }

    fn finish(mut self, document_id: &str) -> BumpResult {
        for relationship in self.merge_relationships() {
            self.payload.add_element(relationship);
        }
        let elements: Vec<String> = self
            .payload
            .ids()
            .filter(|id| *id != document_id)
            .map(str::to_string)
            .collect();
        if let Some(Element::SpdxDocument(document)) = self.payload.get_element_mut(document_id) {
            document.elements = elements;
        }
        debug!(
            elements = self.payload.len(),
            warnings = self.warnings.len(),
            "bumped SPDX 2 document"
        );
        BumpResult {
            payload: self.payload,
            warnings: self.warnings,
        }
    }
}
