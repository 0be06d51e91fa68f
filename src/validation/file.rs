use super::ids::{validate_spdx_id_indexed, SpdxIdScope};
use super::primitives::validate_licensing;
use super::{validate_checksum, with_context, SpdxVersion, ValidationContext, ValidationMessage};
use crate::model::{Document, ElementKind, File, SpdxElementIndex};

#[must_use]
pub fn validate_file_within_document(
    file: &File,
    spdx_version: SpdxVersion,
    document: &Document,
) -> Vec<ValidationMessage> {
    let index = SpdxElementIndex::build(document);
    validate_file_indexed(file, spdx_version, document, &index)
}

pub(crate) fn validate_file_indexed(
    file: &File,
    spdx_version: SpdxVersion,
    document: &Document,
    index: &SpdxElementIndex,
) -> Vec<ValidationMessage> {
    let context = ValidationContext::new(ElementKind::File)
        .with_spdx_id(&file.spdx_id)
        .with_parent_id(document.spdx_id())
        .with_element(file);
    let mut messages = with_context(
        validate_spdx_id_indexed(&file.spdx_id, document, index, SpdxIdScope::Syntax),
        &context,
    );

    if !file.name.starts_with("./") {
        messages.push(ValidationMessage::new(
            format!(
                "file name must be a relative path to the file, starting with \"./\", but is: {}",
                file.name
            ),
            context.clone(),
        ));
    }

    if file.sha1().is_none() {
        let algorithms: Vec<&str> = file.checksums.iter().map(|c| c.algorithm.as_str()).collect();
        messages.push(ValidationMessage::new(
            format!(
                "checksums must contain a SHA1 algorithm checksum, but only contains: {algorithms:?}"
            ),
            context.clone(),
        ));
    }
    for checksum in &file.checksums {
        messages.extend(validate_checksum(checksum, &file.spdx_id, spdx_version));
    }

    if spdx_version == SpdxVersion::V2_2 && file.license_info_in_file.is_empty() {
        messages.push(ValidationMessage::new(
            "license_info_in_file is mandatory in SPDX-2.2 and must not be empty",
            context.clone(),
        ));
    }
    messages.extend(validate_licensing(file, document, spdx_version, &context));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Checksum, ChecksumAlgorithm, ThreeValued};
    use crate::validation::test_support::{document, file};

    #[test]
    fn test_valid_file() {
        let doc = document("SPDX-2.2");
        let f = file("SPDXRef-F", "./src/main.rs");
        assert!(validate_file_within_document(&f, SpdxVersion::V2_2, &doc).is_empty());
    }

    #[test]
    fn test_name_must_be_relative() {
        let doc = document("SPDX-2.3");
        let f = file("SPDXRef-F", "src/main.rs");
        let messages = validate_file_within_document(&f, SpdxVersion::V2_3, &doc);
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].validation_message,
            "file name must be a relative path to the file, starting with \"./\", but is: src/main.rs"
        );
    }

    #[test]
    fn test_sha1_required() {
        let doc = document("SPDX-2.3");
        let mut f = file("SPDXRef-F", "./a");
        f.checksums = vec![Checksum::new(ChecksumAlgorithm::Md5, "a".repeat(32))];
        let messages = validate_file_within_document(&f, SpdxVersion::V2_3, &doc);
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].validation_message,
            "checksums must contain a SHA1 algorithm checksum, but only contains: [\"MD5\"]"
        );
    }

    #[test]
    fn test_mandatory_fields_in_2_2() {
        let doc = document("SPDX-2.2");
        let mut f = file("SPDXRef-F", "./a");
        f.license_concluded = None;
        f.license_info_in_file.clear();
        f.copyright_text = None;
        assert_eq!(
            validate_file_within_document(&f, SpdxVersion::V2_2, &doc).len(),
            3
        );
        let doc = document("SPDX-2.3");
        assert!(validate_file_within_document(&f, SpdxVersion::V2_3, &doc).is_empty());
    }

    #[test]
    fn test_unknown_license_in_file() {
        let doc = document("SPDX-2.3");
        let mut f = file("SPDXRef-F", "./a");
        f.license_info_in_file = vec![ThreeValued::Value("LicenseRef-missing".parse().unwrap())];
        let messages = validate_file_within_document(&f, SpdxVersion::V2_3, &doc);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].context.element_type, ElementKind::LicenseExpression);
    }
}
