//! Parser for the nested mapping shared by JSON, YAML and XML.
//!
//! The tree is walked top-down; each subtree goes to its own parser with a
//! local [`Logger`]. Failed subtrees are dropped and their messages are
//! collected under the element class name, then raised together.
//!
//! Containment can be expressed three ways: explicit relationships,
//! `documentDescribes` and per-package `hasFiles`. Explicit relationships are
//! read first; the two lists only add edges that are not already present.

mod creation_info;
mod elements;
mod fields;
mod relationships;

use crate::error::SpdxParsingError;
use crate::logger::Logger;
use crate::model::{Document, ElementKind};
use fields::Fields;
use serde_json::Value;
use tracing::debug;

/// Builds a [`Document`] from the intermediate tree.
pub fn parse_document_value(value: &Value) -> Result<Document, SpdxParsingError> {
    let mut logger = Logger::new();
    let creation_info = match creation_info::parse_creation_info(value) {
        Ok(info) => Some(info),
        Err(local) => {
            logger.append_element(ElementKind::CreationInfo.as_str(), local);
            None
        }
    };

    let packages = parse_list(value, "packages", ElementKind::Package, elements::parse_package, &mut logger);
    let files = parse_list(value, "files", ElementKind::File, elements::parse_file, &mut logger);
    let snippets = parse_list(value, "snippets", ElementKind::Snippet, elements::parse_snippet, &mut logger);
    let extracted_licensing_info = parse_list(
        value,
        "hasExtractedLicensingInfos",
        ElementKind::ExtractedLicensingInfo,
        elements::parse_extracted_licensing_info,
        &mut logger,
    );
    let relationships = parse_list(
        value,
        "relationships",
        ElementKind::Relationship,
        relationships::parse_relationship,
        &mut logger,
    );
    let document_id = value.get("SPDXID").and_then(Value::as_str);
    let annotations = relationships::parse_all_annotations(value, document_id, &mut logger);

    logger.raise_if_nonempty()?;
    let Some(creation_info) = creation_info else {
        return Err(SpdxParsingError::single("CreationInfo could not be parsed"));
    };

    let mut document = Document::new(creation_info);
    document.packages = packages;
    document.files = files;
    document.snippets = snippets;
    document.extracted_licensing_info = extracted_licensing_info;
    document.relationships = relationships;
    document.annotations = annotations;
    relationships::add_implied_relationships(value, &mut document);

    debug!(
        packages = document.packages.len(),
        files = document.files.len(),
        snippets = document.snippets.len(),
        relationships = document.relationships.len(),
        "parsed SPDX document tree"
    );
    Ok(document)
}

fn parse_list<T>(
    document: &Value,
    key: &str,
    kind: ElementKind,
    parse: fn(&Value) -> Result<T, Logger>,
    logger: &mut Logger,
) -> Vec<T> {
    let mut out = Vec::new();
    for item in Fields::new(document).list(key) {
        match parse(item) {
            Ok(element) => out.push(element),
            Err(local) => logger.append_element(kind.as_str(), local),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RelationshipType, ThreeValued};
    use serde_json::json;

    fn document(extra: Value) -> Value {
        let mut base = json!({
            "spdxVersion": "SPDX-2.3",
            "SPDXID": "SPDXRef-DOCUMENT",
            "name": "Doc",
            "dataLicense": "CC0-1.0",
            "documentNamespace": "https://x/y",
            "creationInfo": {"creators": ["Tool: LF-1.0"], "created": "2022-12-01T00:00:00Z"},
            "packages": [{
                "SPDXID": "SPDXRef-P",
                "name": "p",
                "downloadLocation": "NONE",
                "hasFiles": ["SPDXRef-F1"]
            }],
            "files": [{
                "SPDXID": "SPDXRef-F1",
                "fileName": "./a.c",
                "checksums": [{"algorithm": "SHA1", "checksumValue": "85ed0817af83a24ad8da68c2b5094de69833983c"}]
            }],
            "documentDescribes": ["SPDXRef-P"]
        });
        if let (Some(base), Value::Object(extra)) = (base.as_object_mut(), extra) {
            base.extend(extra);
        }
        base
    }

    #[test]
    fn test_has_files_and_explicit_contains_collapse() {
        let value = document(json!({
            "relationships": [{
                "spdxElementId": "SPDXRef-P",
                "relationshipType": "CONTAINS",
                "relatedSpdxElement": "SPDXRef-F1"
            }]
        }));
        let doc = parse_document_value(&value).unwrap();
        let contains: Vec<_> = doc
            .relationships
            .iter()
            .filter(|r| r.relationship_type == RelationshipType::Contains)
            .collect();
        assert_eq!(contains.len(), 1);
        assert_eq!(doc.relationships.len(), 2);
    }

    #[test]
    fn test_inverse_relationship_suppresses_describes() {
        let value = document(json!({
            "relationships": [{
                "spdxElementId": "SPDXRef-P",
                "relationshipType": "DESCRIBED_BY",
                "relatedSpdxElement": "SPDXRef-DOCUMENT"
            }]
        }));
        let doc = parse_document_value(&value).unwrap();
        assert!(!doc
            .relationships
            .iter()
            .any(|r| r.relationship_type == RelationshipType::Describes));
        assert_eq!(doc.described_ids(), vec!["SPDXRef-P"]);
    }

    #[test]
    fn test_implied_edges_come_after_explicit_ones() {
        let doc = parse_document_value(&document(json!({}))).unwrap();
        assert_eq!(doc.relationships[0].relationship_type, RelationshipType::Describes);
        assert_eq!(doc.relationships[1].spdx_element_id, "SPDXRef-P");
        assert_eq!(
            doc.relationships[1].related_spdx_element_id,
            ThreeValued::Value("SPDXRef-F1".to_string())
        );
    }

    #[test]
    fn test_errors_across_elements_are_batched() {
        let value = document(json!({
            "files": [{"SPDXID": "SPDXRef-F1"}],
            "relationships": [{"spdxElementId": "SPDXRef-P"}]
        }));
        let err = parse_document_value(&value).unwrap_err();
        assert_eq!(
            err.messages,
            vec![
                "Error while parsing File: ['fileName is required, but was not provided', 'checksums is required, but was not provided']",
                "Error while parsing Relationship: ['relationshipType is required, but was not provided', 'relatedSpdxElement is required, but was not provided']",
            ]
        );
    }
}
