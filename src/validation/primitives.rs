//! Actors, checksums and license expressions.

use super::{SpdxVersion, ValidationContext, ValidationMessage};
use crate::model::license::DOCUMENT_REF_PREFIX;
use crate::model::{
    Actor, ActorType, Checksum, ChecksumAlgorithm, Document, ElementKind, LicenseExpression,
    LicensedElement, ThreeValued,
};
use regex::Regex;
use std::sync::LazyLock;

static LOWER_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]*$").expect("static regex"));

#[must_use]
pub fn validate_actor(actor: &Actor, parent_id: &str) -> Vec<ValidationMessage> {
    let mut messages = Vec::new();
    let context = || {
        ValidationContext::new(ElementKind::Actor)
            .with_parent_id(parent_id)
            .with_element(actor)
    };
    if actor.actor_type == ActorType::Tool {
        if let Some(email) = &actor.email {
            messages.push(ValidationMessage::new(
                format!("email must be None if actor_type is TOOL, but is: {email}"),
                context(),
            ));
        }
    }
    if actor.name.trim().is_empty() {
        messages.push(ValidationMessage::new("actor name must not be empty", context()));
    }
    messages
}

/// Checks the value length and alphabet for the algorithm, plus version support.
#[must_use]
pub fn validate_checksum(
    checksum: &Checksum,
    parent_id: &str,
    spdx_version: SpdxVersion,
) -> Vec<ValidationMessage> {
    let mut messages = Vec::new();
    let context = || {
        ValidationContext::new(ElementKind::Checksum)
            .with_parent_id(parent_id)
            .with_element(checksum)
    };
    let algorithm = checksum.algorithm;

    if spdx_version == SpdxVersion::V2_2 && !supported_in_2_2(algorithm) {
        messages.push(ValidationMessage::new(
            format!("{algorithm} is not supported in SPDX-2.2"),
            context(),
        ));
    }

    let value = &checksum.value;
    let length = value.len();
    let (length_ok, expected) = match algorithm.hex_length() {
        Some(expected) => (length == expected, expected.to_string()),
        None if algorithm == ChecksumAlgorithm::Blake3 => (length >= 256, "at least 256".to_string()),
        None => (length <= 512, "at most 512".to_string()),
    };
    if !length_ok || !LOWER_HEX.is_match(value) {
        messages.push(ValidationMessage::new(
            format!(
                "value of {algorithm} must consist of {expected} lowercase hexadecimal digits, but is: {value} (length: {length} digits)"
            ),
            context(),
        ));
    }
    messages
}

const fn supported_in_2_2(algorithm: ChecksumAlgorithm) -> bool {
    !matches!(
        algorithm,
        ChecksumAlgorithm::Sha3_256
            | ChecksumAlgorithm::Sha3_384
            | ChecksumAlgorithm::Sha3_512
            | ChecksumAlgorithm::Blake2b256
            | ChecksumAlgorithm::Blake2b384
            | ChecksumAlgorithm::Blake2b512
            | ChecksumAlgorithm::Blake3
            | ChecksumAlgorithm::Adler32
    )
}

/// Checks that every symbol is on the SPDX license list or declared in the
/// document's extracted licensing info, and that external `DocumentRef-`
/// prefixes are declared.
#[must_use]
pub fn validate_license_expression(
    expression: &ThreeValued<LicenseExpression>,
    document: &Document,
    parent_id: &str,
) -> Vec<ValidationMessage> {
    let ThreeValued::Value(expression) = expression else {
        return Vec::new();
    };
    let context = ValidationContext::new(ElementKind::LicenseExpression)
        .with_parent_id(parent_id)
        .with_element(expression);
    let mut messages = Vec::new();

    for id in expression.license_ids() {
        if let Some(problem) = check_license_symbol(id, document) {
            messages.push(ValidationMessage::new(
                format!(
                    "{problem}. license_expression must only use IDs from the license list or extracted licensing info, but is: {expression}"
                ),
                context.clone(),
            ));
        }
    }
    for exception in expression.exception_ids() {
        if spdx::exception_id(exception).is_none() {
            messages.push(ValidationMessage::new(
                format!(
                    "Unrecognized license exception: {exception}. license_expression must only use exceptions from the SPDX exception list, but is: {expression}"
                ),
                context.clone(),
            ));
        }
    }
    messages
}

/// License expressions of a package, file or snippet, plus the licensing
/// fields SPDX-2.2 made mandatory.
pub(crate) fn validate_licensing<E: LicensedElement>(
    element: &E,
    document: &Document,
    spdx_version: SpdxVersion,
    context: &ValidationContext,
) -> Vec<ValidationMessage> {
    let mut messages = Vec::new();
    for expression in element
        .license_concluded()
        .into_iter()
        .chain(element.license_declared())
        .chain(element.license_infos())
    {
        messages.extend(validate_license_expression(
            expression,
            document,
            element.spdx_id(),
        ));
    }
    if spdx_version == SpdxVersion::V2_2 {
        let mut mandatory = vec![("license_concluded", element.license_concluded().is_none())];
        if E::KIND == ElementKind::Package {
            mandatory.push(("license_declared", element.license_declared().is_none()));
        }
        mandatory.push(("copyright_text", element.copyright_text().is_none()));
        for (field, missing) in mandatory {
            if missing {
                messages.push(ValidationMessage::new(
                    format!("{field} is mandatory in SPDX-2.2 and must not be None"),
                    context.clone(),
                ));
            }
        }
    }
    messages
}

fn check_license_symbol(id: &str, document: &Document) -> Option<String> {
    if id.starts_with(DOCUMENT_REF_PREFIX) {
        let Some((document_ref, _)) = id.split_once(':') else {
            return Some(format!("Unrecognized license reference: {id}"));
        };
        return document
            .creation_info
            .external_document_ref(document_ref)
            .is_none()
            .then(|| format!("Unrecognized external document reference: {document_ref}"));
    }
    let known = if crate::model::license::is_custom_license_id(id) {
        document
            .extracted_licensing_info
            .iter()
            .any(|info| info.license_id.as_deref() == Some(id))
    } else {
        spdx::license_id(id).is_some()
    };
    (!known).then(|| format!("Unrecognized license reference: {id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExtractedLicensingInfo;
    use crate::validation::test_support::document;

    #[test]
    fn test_checksum_lengths() {
        for algorithm in ChecksumAlgorithm::ALL {
            let Some(length) = algorithm.hex_length() else {
                continue;
            };
            let good = Checksum::new(algorithm, "a".repeat(length));
            assert!(validate_checksum(&good, "SPDXRef-P", SpdxVersion::V2_3).is_empty());
            let short = Checksum::new(algorithm, "a".repeat(length - 1));
            assert_eq!(validate_checksum(&short, "SPDXRef-P", SpdxVersion::V2_3).len(), 1);
        }
    }

    #[test]
    fn test_uppercase_hex_rejected() {
        let checksum = Checksum::new(ChecksumAlgorithm::Md5, "A".repeat(32));
        let messages = validate_checksum(&checksum, "SPDXRef-P", SpdxVersion::V2_3);
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].validation_message,
            format!(
                "value of MD5 must consist of 32 lowercase hexadecimal digits, but is: {} (length: 32 digits)",
                "A".repeat(32)
            )
        );
    }

    #[test]
    fn test_variable_length_algorithms() {
        let blake3 = Checksum::new(ChecksumAlgorithm::Blake3, "b".repeat(256));
        assert!(validate_checksum(&blake3, "x", SpdxVersion::V2_3).is_empty());
        let md6 = Checksum::new(ChecksumAlgorithm::Md6, "c".repeat(513));
        assert_eq!(validate_checksum(&md6, "x", SpdxVersion::V2_3).len(), 1);
    }

    #[test]
    fn test_new_algorithms_not_in_2_2() {
        let checksum = Checksum::new(ChecksumAlgorithm::Adler32, "0123abcd");
        let messages = validate_checksum(&checksum, "x", SpdxVersion::V2_2);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].validation_message, "ADLER32 is not supported in SPDX-2.2");
    }

    #[test]
    fn test_tool_with_email() {
        let actor = Actor {
            actor_type: ActorType::Tool,
            name: "tool".to_string(),
            email: Some("a@b.c".to_string()),
        };
        assert_eq!(validate_actor(&actor, "SPDXRef-DOCUMENT").len(), 1);
    }

    #[test]
    fn test_license_references() {
        let mut doc = document("SPDX-2.3");
        let expression: ThreeValued<LicenseExpression> = ThreeValued::Value(
            "MIT AND LicenseRef-custom".parse().unwrap(),
        );
        let messages = validate_license_expression(&expression, &doc, "SPDXRef-P");
        assert_eq!(messages.len(), 1);
        assert!(messages[0]
            .validation_message
            .starts_with("Unrecognized license reference: LicenseRef-custom"));

        doc.extracted_licensing_info.push(ExtractedLicensingInfo {
            license_id: Some("LicenseRef-custom".to_string()),
            extracted_text: Some("text".to_string()),
            ..Default::default()
        });
        assert!(validate_license_expression(&expression, &doc, "SPDXRef-P").is_empty());
    }

    #[test]
    fn test_unknown_listed_license_and_exception() {
        let doc = document("SPDX-2.3");
        let expression = ThreeValued::Value(
            "Not-A-License OR GPL-2.0-only WITH Not-An-Exception".parse().unwrap(),
        );
        assert_eq!(validate_license_expression(&expression, &doc, "x").len(), 2);
        assert!(validate_license_expression(&ThreeValued::NoAssertion, &doc, "x").is_empty());
    }
}
