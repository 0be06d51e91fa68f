//! Relationships and annotations, the two entities that point at other elements.

use super::ids::{validate_spdx_id_indexed, SpdxIdScope};
use super::{validate_actor, with_context, SpdxVersion, ValidationContext, ValidationMessage};
use crate::model::{
    Annotation, Document, ElementKind, Relationship, RelationshipType, SpdxElementIndex,
    ThreeValued,
};

#[must_use]
pub fn validate_relationship(
    relationship: &Relationship,
    spdx_version: SpdxVersion,
    document: &Document,
) -> Vec<ValidationMessage> {
    let index = SpdxElementIndex::build(document);
    validate_relationship_indexed(relationship, spdx_version, document, &index)
}

pub(crate) fn validate_relationship_indexed(
    relationship: &Relationship,
    spdx_version: SpdxVersion,
    document: &Document,
    index: &SpdxElementIndex,
) -> Vec<ValidationMessage> {
    let context = ValidationContext::new(ElementKind::Relationship).with_element(relationship);
    let mut messages = validate_spdx_id_indexed(
        &relationship.spdx_element_id,
        document,
        index,
        SpdxIdScope::Document,
    );
    if let ThreeValued::Value(related) = &relationship.related_spdx_element_id {
        messages.extend(validate_spdx_id_indexed(
            related,
            document,
            index,
            SpdxIdScope::Document,
        ));
    }

    if spdx_version == SpdxVersion::V2_2
        && matches!(
            relationship.relationship_type,
            RelationshipType::SpecificationFor | RelationshipType::RequirementDescriptionFor
        )
    {
        messages.push(format!(
            "{} is not supported in SPDX-2.2",
            relationship.relationship_type
        ));
    }
    with_context(messages, &context)
}

#[must_use]
pub fn validate_annotation(annotation: &Annotation, document: &Document) -> Vec<ValidationMessage> {
    let index = SpdxElementIndex::build(document);
    validate_annotation_indexed(annotation, document, &index)
}

pub(crate) fn validate_annotation_indexed(
    annotation: &Annotation,
    document: &Document,
    index: &SpdxElementIndex,
) -> Vec<ValidationMessage> {
    let context = ValidationContext::new(ElementKind::Annotation).with_element(annotation);
    let mut messages = validate_actor(&annotation.annotator, &annotation.spdx_id);
    messages.extend(with_context(
        validate_spdx_id_indexed(&annotation.spdx_id, document, index, SpdxIdScope::Document),
        &context,
    ));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{datetime::parse_datetime, Actor, AnnotationType};
    use crate::validation::test_support::document;

    fn rel(from: &str, kind: RelationshipType, to: ThreeValued<String>) -> Relationship {
        Relationship::new(from, kind, to)
    }

    #[test]
    fn test_unknown_endpoints() {
        let doc = document("SPDX-2.3");
        let relationship = rel(
            "SPDXRef-DOCUMENT",
            RelationshipType::DependsOn,
            ThreeValued::Value("SPDXRef-missing".to_string()),
        );
        let messages = validate_relationship(&relationship, SpdxVersion::V2_3, &doc);
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].validation_message,
            "did not find the referenced spdx_id SPDXRef-missing in the SPDX document"
        );
    }

    #[test]
    fn test_singleton_targets_are_valid() {
        let doc = document("SPDX-2.3");
        for target in [ThreeValued::None, ThreeValued::NoAssertion] {
            let relationship = rel("SPDXRef-P", RelationshipType::DependsOn, target);
            assert!(validate_relationship(&relationship, SpdxVersion::V2_3, &doc).is_empty());
        }
    }

    #[test]
    fn test_new_types_not_in_2_2() {
        let doc = document("SPDX-2.2");
        let relationship = rel(
            "SPDXRef-DOCUMENT",
            RelationshipType::SpecificationFor,
            ThreeValued::Value("SPDXRef-P".to_string()),
        );
        let messages = validate_relationship(&relationship, SpdxVersion::V2_2, &doc);
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].validation_message,
            "SPECIFICATION_FOR is not supported in SPDX-2.2"
        );
        assert!(validate_relationship(&relationship, SpdxVersion::V2_3, &doc).is_empty());
    }

    #[test]
    fn test_annotation_target() {
        let doc = document("SPDX-2.3");
        let mut annotation = Annotation::new(
            "SPDXRef-P",
            AnnotationType::Review,
            Actor::person("Jane Doe", Some("jane@example.com".to_string())).unwrap(),
            parse_datetime("2023-01-01T00:00:00Z").unwrap(),
            "looks good",
        );
        assert!(validate_annotation(&annotation, &doc).is_empty());
        annotation.spdx_id = "SPDXRef-nowhere".to_string();
        assert_eq!(validate_annotation(&annotation, &doc).len(), 1);
    }
}
