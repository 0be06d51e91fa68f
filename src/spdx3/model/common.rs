//! Core profile: creation info, integrity, identifiers, agents, documents
//! and annotations.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Version written into every bumped [`CreationInfo`].
pub const SPDX3_SPEC_VERSION: &str = "3.0.1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileIdentifier {
    Core,
    Software,
    #[serde(rename = "simpleLicensing")]
    Licensing,
    Security,
    Build,
}

/// Provenance shared by the elements of one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationInfo {
    pub spec_version: String,
    pub created: DateTime<Utc>,
    /// Ids of the Person and Organization agents
    pub created_by: Vec<String>,
    /// Ids of the Tool agents
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub created_using: Vec<String>,
    pub profile: Vec<ProfileIdentifier>,
    pub data_license: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl CreationInfo {
    pub fn new(created: DateTime<Utc>, data_license: impl Into<String>) -> Self {
        Self {
            spec_version: SPDX3_SPEC_VERSION.to_string(),
            created,
            created_by: Vec::new(),
            created_using: Vec::new(),
            profile: vec![
                ProfileIdentifier::Core,
                ProfileIdentifier::Software,
                ProfileIdentifier::Licensing,
            ],
            data_license: data_license.into(),
            comment: None,
        }
    }
}

// ============================================================================
// Integrity and identifiers
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HashAlgorithm {
    #[serde(rename = "BLAKE2b256")]
    Blake2b256,
    #[serde(rename = "BLAKE2b384")]
    Blake2b384,
    #[serde(rename = "BLAKE2b512")]
    Blake2b512,
    #[serde(rename = "BLAKE3")]
    Blake3,
    #[serde(rename = "MD2")]
    Md2,
    #[serde(rename = "MD4")]
    Md4,
    #[serde(rename = "MD5")]
    Md5,
    #[serde(rename = "MD6")]
    Md6,
    #[serde(rename = "SHA1")]
    Sha1,
    #[serde(rename = "SHA224")]
    Sha224,
    #[serde(rename = "SHA256")]
    Sha256,
    #[serde(rename = "SHA384")]
    Sha384,
    #[serde(rename = "SHA512")]
    Sha512,
    #[serde(rename = "SHA3_256")]
    Sha3_256,
    #[serde(rename = "SHA3_384")]
    Sha3_384,
    #[serde(rename = "SHA3_512")]
    Sha3_512,
    #[serde(rename = "OTHER")]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hash {
    pub algorithm: HashAlgorithm,
    pub hash_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Hash {
    pub fn new(algorithm: HashAlgorithm, hash_value: impl Into<String>) -> Self {
        Self {
            algorithm,
            hash_value: hash_value.into(),
            comment: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExternalIdentifierType {
    Cpe22,
    Cpe23,
    Email,
    Gitoid,
    Other,
    PackageUrl,
    Swhid,
    Swid,
    UrlScheme,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalIdentifier {
    pub external_identifier_type: ExternalIdentifierType,
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ExternalIdentifier {
    pub fn new(external_identifier_type: ExternalIdentifierType, identifier: impl Into<String>) -> Self {
        Self {
            external_identifier_type,
            identifier: identifier.into(),
            comment: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExternalReferenceType {
    AltWebPage,
    Documentation,
    License,
    Other,
    SecurityAdvisory,
    SecurityFix,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalReference {
    pub external_reference_type: ExternalReferenceType,
    pub locator: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// An element defined in another document, imported by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalMap {
    pub external_spdx_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub verified_using: Vec<Hash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_hint: Option<String>,
}

/// Maps an id prefix such as `DocumentRef-ext` to the namespace it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceMap {
    pub prefix: String,
    pub namespace: String,
}

// ============================================================================
// Elements
// ============================================================================

/// Properties every element carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementInfo {
    pub spdx_id: String,
    pub creation_info: CreationInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub verified_using: Vec<Hash>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external_reference: Vec<ExternalReference>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external_identifier: Vec<ExternalIdentifier>,
}

impl ElementInfo {
    pub fn new(spdx_id: impl Into<String>, creation_info: CreationInfo) -> Self {
        Self {
            spdx_id: spdx_id.into(),
            creation_info,
            name: None,
            summary: None,
            description: None,
            comment: None,
            verified_using: Vec::new(),
            external_reference: Vec::new(),
            external_identifier: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A Person, Organization or Tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Agent {
    #[serde(flatten)]
    pub element: ElementInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpdxDocument {
    #[serde(flatten)]
    pub element: ElementInfo,
    pub root_element: Vec<String>,
    /// Ids of every other element of the payload
    #[serde(rename = "element")]
    pub elements: Vec<String>,
    #[serde(rename = "import", skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<ExternalMap>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub namespace_map: Vec<NamespaceMap>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnotationType {
    Review,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    #[serde(flatten)]
    pub element: ElementInfo,
    pub annotation_type: AnnotationType,
    /// Id of the annotated element
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
}
