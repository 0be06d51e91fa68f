use super::ids::{validate_spdx_id_indexed, SpdxIdScope};
use super::primitives::validate_licensing;
use super::{with_context, SpdxVersion, ValidationContext, ValidationMessage};
use crate::model::{Document, ElementKind, Range, Snippet, SpdxElementIndex};

#[must_use]
pub fn validate_snippet_within_document(
    snippet: &Snippet,
    spdx_version: SpdxVersion,
    document: &Document,
) -> Vec<ValidationMessage> {
    let index = SpdxElementIndex::build(document);
    validate_snippet_indexed(snippet, spdx_version, document, &index)
}

pub(crate) fn validate_snippet_indexed(
    snippet: &Snippet,
    spdx_version: SpdxVersion,
    document: &Document,
    index: &SpdxElementIndex,
) -> Vec<ValidationMessage> {
    let context = ValidationContext::new(ElementKind::Snippet)
        .with_spdx_id(&snippet.spdx_id)
        .with_parent_id(document.spdx_id())
        .with_element(snippet);
    let mut messages = with_context(
        validate_spdx_id_indexed(&snippet.spdx_id, document, index, SpdxIdScope::Syntax),
        &context,
    );
    messages.extend(with_context(
        validate_spdx_id_indexed(&snippet.file_spdx_id, document, index, SpdxIdScope::Files),
        &context,
    ));

    let mut range_messages = validate_range("byte_range", snippet.byte_range);
    if let Some(line_range) = snippet.line_range {
        range_messages.extend(validate_range("line_range", line_range));
    }
    messages.extend(with_context(range_messages, &context));

    messages.extend(validate_licensing(snippet, document, spdx_version, &context));
    messages
}

fn validate_range(field: &str, (start, end): Range) -> Vec<String> {
    let mut messages = Vec::new();
    if start < 1 || end < 1 {
        messages.push(format!(
            "{field} values must be greater than or equal to 1, but is: ({start}, {end})"
        ));
    }
    if start > end {
        messages.push(format!(
            "the first value of {field} must be less than or equal to the second, but is: ({start}, {end})"
        ));
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ThreeValued;
    use crate::validation::test_support::{document, file};

    fn snippet(byte_range: Range) -> Snippet {
        let mut snippet = Snippet::new("SPDXRef-S", "SPDXRef-F", byte_range);
        snippet.license_concluded = Some(ThreeValued::NoAssertion);
        snippet.copyright_text = Some(ThreeValued::None);
        snippet
    }

    #[test]
    fn test_valid_snippet() {
        let mut doc = document("SPDX-2.2");
        doc.files.push(file("SPDXRef-F", "./f"));
        let mut s = snippet((5, 5));
        s.line_range = Some((1, 3));
        assert!(validate_snippet_within_document(&s, SpdxVersion::V2_2, &doc).is_empty());
    }

    #[test]
    fn test_ranges() {
        let mut doc = document("SPDX-2.3");
        doc.files.push(file("SPDXRef-F", "./f"));
        let messages = validate_snippet_within_document(&snippet((0, 10)), SpdxVersion::V2_3, &doc);
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].validation_message,
            "byte_range values must be greater than or equal to 1, but is: (0, 10)"
        );
        let messages = validate_snippet_within_document(&snippet((5, 4)), SpdxVersion::V2_3, &doc);
        assert_eq!(
            messages[0].validation_message,
            "the first value of byte_range must be less than or equal to the second, but is: (5, 4)"
        );
    }

    #[test]
    fn test_file_must_exist() {
        let doc = document("SPDX-2.3");
        let messages = validate_snippet_within_document(&snippet((1, 2)), SpdxVersion::V2_3, &doc);
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].validation_message,
            "did not find the referenced spdx_id SPDXRef-F in the SPDX document's files"
        );
    }
}
