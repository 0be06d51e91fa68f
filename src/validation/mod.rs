//! Document validation against a target SPDX version.
//!
//! Validation never fails: it walks the document and returns every problem
//! as a [`ValidationMessage`]. Callers decide whether messages are warnings
//! or errors.
//!
//! ```ignore
//! use spdx_tools::validation::validate_full_spdx_document;
//!
//! let messages = validate_full_spdx_document(&document, Some("SPDX-2.2"));
//! for message in &messages {
//!     eprintln!("{message}");
//! }
//! ```

mod creation_info;
mod extracted;
mod file;
mod ids;
mod package;
mod primitives;
mod relationship;
mod snippet;

pub use creation_info::{validate_creation_info, validate_external_document_ref};
pub use extracted::validate_extracted_licensing_info;
pub use file::validate_file_within_document;
pub use ids::{
    is_valid_download_location, is_valid_uri, is_valid_url, validate_spdx_id, SpdxIdScope,
};
pub use package::{
    validate_external_package_ref, validate_package_within_document,
    validate_verification_code,
};
pub use primitives::{validate_actor, validate_checksum, validate_license_expression};
pub use relationship::{validate_annotation, validate_relationship};
pub use snippet::validate_snippet_within_document;

use crate::model::{Document, ElementKind, SpdxElementIndex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Versions
// ============================================================================

/// The SPDX 2 versions the validator knows rules for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpdxVersion {
    #[serde(rename = "SPDX-2.2")]
    V2_2,
    #[serde(rename = "SPDX-2.3")]
    V2_3,
}

impl SpdxVersion {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V2_2 => "SPDX-2.2",
            Self::V2_3 => "SPDX-2.3",
        }
    }
}

impl fmt::Display for SpdxVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpdxVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "SPDX-2.2" => Ok(Self::V2_2),
            "SPDX-2.3" => Ok(Self::V2_3),
            other => Err(format!(
                "only SPDX versions \"SPDX-2.2\" and \"SPDX-2.3\" are supported, but got: {other}"
            )),
        }
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Where a validation message was raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationContext {
    /// Id of the offending element, when it has one
    pub spdx_id: Option<String>,
    /// Id of the enclosing element
    pub parent_id: Option<String>,
    pub element_type: ElementKind,
    /// Debug rendering of the offending element
    pub full_element: Option<String>,
}

impl ValidationContext {
    pub fn new(element_type: ElementKind) -> Self {
        Self {
            spdx_id: None,
            parent_id: None,
            element_type,
            full_element: None,
        }
    }

    #[must_use]
    pub fn with_spdx_id(mut self, spdx_id: impl Into<String>) -> Self {
        self.spdx_id = Some(spdx_id.into());
        self
    }

    #[must_use]
    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    #[must_use]
    pub fn with_element(mut self, element: &impl fmt::Debug) -> Self {
        self.full_element = Some(format!("{element:?}"));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationMessage {
    pub validation_message: String,
    pub context: ValidationContext,
}

impl ValidationMessage {
    pub fn new(validation_message: impl Into<String>, context: ValidationContext) -> Self {
        Self {
            validation_message: validation_message.into(),
            context,
        }
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context.spdx_id {
            Some(id) => write!(
                f,
                "{} {id}: {}",
                self.context.element_type, self.validation_message
            ),
            None => write!(f, "{}: {}", self.context.element_type, self.validation_message),
        }
    }
}

/// Wraps plain messages from a field validator into full validation messages.
pub(crate) fn with_context(messages: Vec<String>, context: &ValidationContext) -> Vec<ValidationMessage> {
    messages
        .into_iter()
        .map(|m| ValidationMessage::new(m, context.clone()))
        .collect()
}

// ============================================================================
// Entry point
// ============================================================================

/// Validates a whole document.
///
/// `spdx_version` defaults to the document's own version. Only `SPDX-2.2`
/// and `SPDX-2.3` are accepted; a requested version that differs from the
/// document's version yields a single message and nothing else is checked.
#[must_use]
pub fn validate_full_spdx_document(
    document: &Document,
    spdx_version: Option<&str>,
) -> Vec<ValidationMessage> {
    let document_version = document.creation_info.spdx_version.as_str();
    let document_context = ValidationContext::new(ElementKind::Document)
        .with_spdx_id(document.spdx_id());

    let version = match document_version.parse::<SpdxVersion>() {
        Ok(version) => version,
        Err(_) => {
            return vec![ValidationMessage::new(
                format!(
                    "only SPDX versions \"SPDX-2.2\" and \"SPDX-2.3\" are supported, but the document's spdx_version is: {document_version}"
                ),
                document_context,
            )]
        }
    };
    let requested = spdx_version.unwrap_or(document_version);
    if requested != document_version {
        return vec![ValidationMessage::new(
            format!(
                "provided SPDX version {requested} does not match the document's SPDX version {document_version}"
            ),
            document_context,
        )];
    }

    let index = SpdxElementIndex::build(document);
    let mut messages = Vec::new();

    let duplicates = index.duplicate_ids();
    if !duplicates.is_empty() {
        let mut sorted = duplicates.to_vec();
        sorted.sort();
        messages.push(ValidationMessage::new(
            format!(
                "every spdx_id must be unique within the document, but found the following duplicates: {sorted:?}"
            ),
            document_context.clone(),
        ));
    }

    let only_a_single_package =
        document.packages.len() == 1 && document.files.is_empty() && document.snippets.is_empty();
    if !only_a_single_package && document.described_ids().is_empty() {
        let id = document.spdx_id();
        messages.push(ValidationMessage::new(
            format!(
                "there must be at least one relationship \"{id} DESCRIBES ...\" or \"... DESCRIBED_BY {id}\" when there is not only a single package present"
            ),
            document_context,
        ));
    }

    messages.extend(validate_creation_info(&document.creation_info, version));
    for package in &document.packages {
        messages.extend(package::validate_package_indexed(package, version, document, &index));
    }
    for file in &document.files {
        messages.extend(file::validate_file_indexed(file, version, document, &index));
    }
    for snippet in &document.snippets {
        messages.extend(snippet::validate_snippet_indexed(snippet, version, document, &index));
    }
    for annotation in &document.annotations {
        messages.extend(relationship::validate_annotation_indexed(annotation, document, &index));
    }
    for relationship in &document.relationships {
        messages.extend(relationship::validate_relationship_indexed(
            relationship,
            version,
            document,
            &index,
        ));
    }
    for info in &document.extracted_licensing_info {
        messages.extend(validate_extracted_licensing_info(info));
    }

    tracing::debug!(
        elements = index.element_count(),
        messages = messages.len(),
        "Validated document against {version}"
    );
    messages
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::model::{
        datetime::parse_datetime, Actor, Checksum, ChecksumAlgorithm, CreationInfo, Document,
        File, LicenseExpression, Package, Relationship, RelationshipType, ThreeValued,
    };

    pub const SHA1: &str = "85ed0817af83a24ad8da68c2b5094de69833983c";

    pub fn creation_info(version: &str) -> CreationInfo {
        CreationInfo::new(
            version,
            "SPDXRef-DOCUMENT",
            "Doc",
            "https://x/y",
            vec![Actor::tool("LF-1.0").unwrap()],
            parse_datetime("2022-12-01T00:00:00Z").unwrap(),
        )
    }

    /// A package that satisfies both SPDX 2.2 and 2.3.
    pub fn package(id: &str) -> Package {
        let mut package = Package::new(id, "package", ThreeValued::NoAssertion);
        package.license_concluded = Some(ThreeValued::Value(LicenseExpression::symbol("MIT")));
        package.license_declared = Some(ThreeValued::NoAssertion);
        package.copyright_text = Some(ThreeValued::NoAssertion);
        package
    }

    pub fn file(id: &str, name: &str) -> File {
        let mut file = File::new(name, id, vec![Checksum::new(ChecksumAlgorithm::Sha1, SHA1)]);
        file.license_concluded = Some(ThreeValued::NoAssertion);
        file.license_info_in_file = vec![ThreeValued::NoAssertion];
        file.copyright_text = Some(ThreeValued::NoAssertion);
        file
    }

    pub fn document(version: &str) -> Document {
        let mut document = Document::new(creation_info(version));
        document.packages.push(package("SPDXRef-P"));
        document.relationships.push(Relationship::new(
            "SPDXRef-DOCUMENT",
            RelationshipType::Describes,
            ThreeValued::Value("SPDXRef-P".to_string()),
        ));
        document
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::model::{PrimaryPackagePurpose, Relationship, RelationshipType, ThreeValued};

    #[test]
    fn test_valid_document_has_no_messages() {
        let doc = document("SPDX-2.3");
        assert_eq!(validate_full_spdx_document(&doc, None), vec![]);
        assert_eq!(validate_full_spdx_document(&doc, Some("SPDX-2.3")), vec![]);
    }

    #[test]
    fn test_version_mismatch_stops_validation() {
        let mut doc = document("SPDX-2.3");
        doc.files.push(file("SPDXRef-F", "no-dot-slash"));
        let messages = validate_full_spdx_document(&doc, Some("SPDX-2.2"));
        assert_eq!(messages.len(), 1);
        assert!(messages[0].validation_message.contains("does not match"));
    }

    #[test]
    fn test_unsupported_version() {
        let doc = document("SPDX-2.1");
        let messages = validate_full_spdx_document(&doc, None);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].validation_message.starts_with("only SPDX versions"));
    }

    #[test]
    fn test_primary_purpose_gated_by_version() {
        let mut doc = document("SPDX-2.2");
        doc.packages[0].primary_package_purpose = Some(PrimaryPackagePurpose::Application);
        let messages = validate_full_spdx_document(&doc, None);
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].validation_message,
            "primary_package_purpose is not supported in SPDX-2.2"
        );

        doc.creation_info.spdx_version = "SPDX-2.3".to_string();
        assert!(validate_full_spdx_document(&doc, None).is_empty());
    }

    #[test]
    fn test_missing_describes() {
        let mut doc = document("SPDX-2.3");
        doc.relationships.clear();
        // A lone package needs no DESCRIBES relationship.
        assert!(validate_full_spdx_document(&doc, None).is_empty());

        doc.files.push(file("SPDXRef-F", "./f"));
        let messages = validate_full_spdx_document(&doc, None);
        assert_eq!(messages.len(), 1);
        assert!(messages[0]
            .validation_message
            .starts_with("there must be at least one relationship"));
    }

    #[test]
    fn test_described_by_counts() {
        let mut doc = document("SPDX-2.3");
        doc.relationships = vec![Relationship::new(
            "SPDXRef-P",
            RelationshipType::DescribedBy,
            ThreeValued::Value("SPDXRef-DOCUMENT".to_string()),
        )];
        doc.files.push(file("SPDXRef-F", "./f"));
        assert!(validate_full_spdx_document(&doc, None).is_empty());
    }

    #[test]
    fn test_duplicate_ids() {
        let mut doc = document("SPDX-2.3");
        doc.files.push(file("SPDXRef-P", "./f"));
        let messages = validate_full_spdx_document(&doc, None);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].validation_message.contains("[\"SPDXRef-P\"]"));
    }

    #[test]
    fn test_version_parse() {
        assert_eq!("SPDX-2.2".parse::<SpdxVersion>(), Ok(SpdxVersion::V2_2));
        assert!("SPDX-3.0".parse::<SpdxVersion>().is_err());
    }
}
