//! The document aggregate and its creation information.

use super::{
    Actor, Annotation, Checksum, ExtractedLicensingInfo, File, Package, Relationship,
    RelationshipType, Snippet, ThreeValued, Version,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default `DataLicense` of every SPDX 2 document.
pub const DEFAULT_DATA_LICENSE: &str = "CC0-1.0";
/// Conventional id of the document element.
pub const DOCUMENT_SPDX_ID: &str = "SPDXRef-DOCUMENT";

/// A reference to another SPDX document, `DocumentRef-<id> <uri> SHA1: <hex>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalDocumentRef {
    /// `DocumentRef-…` identifier local to this document
    pub document_ref_id: String,
    /// Namespace URI of the referenced document
    pub document_uri: String,
    /// Checksum of the referenced document (SHA1)
    pub checksum: Checksum,
}

impl ExternalDocumentRef {
    pub fn new(
        document_ref_id: impl Into<String>,
        document_uri: impl Into<String>,
        checksum: Checksum,
    ) -> Self {
        Self {
            document_ref_id: document_ref_id.into(),
            document_uri: document_uri.into(),
            checksum,
        }
    }
}

/// Document-level provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationInfo {
    /// `SPDX-M.m`
    pub spdx_version: String,
    /// Id of the document element, normally `SPDXRef-DOCUMENT`
    pub spdx_id: String,
    pub name: String,
    /// Absolute URI without a fragment
    pub document_namespace: String,
    pub creators: Vec<Actor>,
    pub created: DateTime<Utc>,
    pub creator_comment: Option<String>,
    pub data_license: String,
    pub external_document_refs: Vec<ExternalDocumentRef>,
    pub license_list_version: Option<Version>,
    pub document_comment: Option<String>,
}

impl CreationInfo {
    pub fn new(
        spdx_version: impl Into<String>,
        spdx_id: impl Into<String>,
        name: impl Into<String>,
        document_namespace: impl Into<String>,
        creators: Vec<Actor>,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            spdx_version: spdx_version.into(),
            spdx_id: spdx_id.into(),
            name: name.into(),
            document_namespace: document_namespace.into(),
            creators,
            created,
            creator_comment: None,
            data_license: DEFAULT_DATA_LICENSE.to_string(),
            external_document_refs: Vec::new(),
            license_list_version: None,
            document_comment: None,
        }
    }

    /// Looks up a declared external document reference.
    #[must_use]
    pub fn external_document_ref(&self, document_ref_id: &str) -> Option<&ExternalDocumentRef> {
        self.external_document_refs
            .iter()
            .find(|r| r.document_ref_id == document_ref_id)
    }
}

/// An SPDX 2 document. Children are owned by value and refer to each other
/// through `spdx_id` strings only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub creation_info: CreationInfo,
    pub packages: Vec<Package>,
    pub files: Vec<File>,
    pub snippets: Vec<Snippet>,
    pub annotations: Vec<Annotation>,
    pub relationships: Vec<Relationship>,
    pub extracted_licensing_info: Vec<ExtractedLicensingInfo>,
}

impl Document {
    #[must_use]
    pub fn new(creation_info: CreationInfo) -> Self {
        Self {
            creation_info,
            packages: Vec::new(),
            files: Vec::new(),
            snippets: Vec::new(),
            annotations: Vec::new(),
            relationships: Vec::new(),
            extracted_licensing_info: Vec::new(),
        }
    }

    #[must_use]
    pub fn spdx_id(&self) -> &str {
        &self.creation_info.spdx_id
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.creation_info.document_namespace
    }

    /// Ids of all packages, files and snippets, in document order.
    pub fn element_ids(&self) -> impl Iterator<Item = &str> {
        self.packages
            .iter()
            .map(|p| p.spdx_id.as_str())
            .chain(self.files.iter().map(|f| f.spdx_id.as_str()))
            .chain(self.snippets.iter().map(|s| s.spdx_id.as_str()))
    }

    /// Ids the document root `DESCRIBES` (or is `DESCRIBED_BY`), in order.
    #[must_use]
    pub fn described_ids(&self) -> Vec<&str> {
        let root = self.spdx_id();
        let mut ids = Vec::new();
        for rel in &self.relationships {
            let id = match rel.relationship_type {
                RelationshipType::Describes if rel.spdx_element_id == root => {
                    rel.related_spdx_element_id.value().map(String::as_str)
                }
                RelationshipType::DescribedBy
                    if rel.related_spdx_element_id == ThreeValued::Value(root.to_string()) =>
                {
                    Some(rel.spdx_element_id.as_str())
                }
                _ => None,
            };
            if let Some(id) = id {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        ids
    }

    /// Appends a relationship unless an equivalent one is already present.
    ///
    /// Equivalent means same endpoints and type, or the inverse type with the
    /// endpoints swapped; comments are ignored. Returns whether it was added.
    pub fn add_relationship_if_absent(&mut self, relationship: Relationship) -> bool {
        if self
            .relationships
            .iter()
            .any(|existing| existing.is_equivalent(&relationship))
        {
            return false;
        }
        self.relationships.push(relationship);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::datetime::parse_datetime;

    fn document() -> Document {
        Document::new(CreationInfo::new(
            "SPDX-2.3",
            DOCUMENT_SPDX_ID,
            "Doc",
            "https://x/y",
            vec![Actor::tool("LF-1.0").unwrap()],
            parse_datetime("2022-12-01T00:00:00Z").unwrap(),
        ))
    }

    #[test]
    fn test_defaults() {
        let doc = document();
        assert_eq!(doc.creation_info.data_license, "CC0-1.0");
        assert!(doc.packages.is_empty());
    }

    #[test]
    fn test_described_ids_both_directions() {
        let mut doc = document();
        doc.relationships.push(Relationship::new(
            DOCUMENT_SPDX_ID,
            RelationshipType::Describes,
            ThreeValued::Value("SPDXRef-A".to_string()),
        ));
        doc.relationships.push(Relationship::new(
            "SPDXRef-B",
            RelationshipType::DescribedBy,
            ThreeValued::Value(DOCUMENT_SPDX_ID.to_string()),
        ));
        assert_eq!(doc.described_ids(), vec!["SPDXRef-A", "SPDXRef-B"]);
    }

    #[test]
    fn test_add_relationship_if_absent_detects_inverse() {
        let mut doc = document();
        doc.relationships.push(
            Relationship::new(
                "SPDXRef-F",
                RelationshipType::ContainedBy,
                ThreeValued::Value("SPDXRef-P".to_string()),
            )
            .with_comment("explicit"),
        );
        let added = doc.add_relationship_if_absent(Relationship::new(
            "SPDXRef-P",
            RelationshipType::Contains,
            ThreeValued::Value("SPDXRef-F".to_string()),
        ));
        assert!(!added);
        assert_eq!(doc.relationships.len(), 1);
    }
}
