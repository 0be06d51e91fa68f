//! Relationships, annotations and the two convenience lists that imply
//! relationships (`documentDescribes`, `hasFiles`).

use super::fields::Fields;
use crate::logger::Logger;
use crate::model::datetime::parse_datetime;
use crate::model::{
    Actor, Annotation, AnnotationType, Document, Relationship, RelationshipType, ThreeValued,
};
use serde_json::Value;

pub(super) fn parse_relationship(value: &Value) -> Result<Relationship, Logger> {
    let mut fields = Fields::new(value);
    let from = fields.required_str("spdxElementId");
    let relationship_type = if fields.has("relationshipType") {
        fields.enumeration::<RelationshipType>("relationshipType")
    } else {
        fields.missing("relationshipType");
        None
    };
    let to = fields.required_str("relatedSpdxElement");
    let comment = fields.str("comment");
    let relationship = match (from, relationship_type, to) {
        (Some(from), Some(relationship_type), Some(to)) => {
            let mut relationship =
                Relationship::new(from, relationship_type, ThreeValued::parse_str(&to));
            relationship.comment = comment;
            Some(relationship)
        }
        _ => None,
    };
    fields.finish(relationship)
}

/// Parses one annotation; `target` is the element it is nested under, if any.
pub(super) fn parse_annotation(value: &Value, target: Option<&str>) -> Result<Annotation, Logger> {
    let mut fields = Fields::new(value);
    let spdx_id = match target {
        Some(target) => Some(target.to_string()),
        None => fields.required_str("SPDXID"),
    };
    let annotator = fields
        .required_str("annotator")
        .and_then(|raw| fields.check("annotator", raw.parse::<Actor>()));
    let date = fields
        .required_str("annotationDate")
        .and_then(|raw| fields.check("annotationDate", parse_datetime(&raw)));
    let annotation_type = if fields.has("annotationType") {
        fields.enumeration::<AnnotationType>("annotationType")
    } else {
        fields.missing("annotationType");
        None
    };
    let comment = fields.required_str("comment");
    let annotation = match (spdx_id, annotation_type, annotator, date, comment) {
        (Some(spdx_id), Some(annotation_type), Some(annotator), Some(date), Some(comment)) => {
            Some(Annotation::new(spdx_id, annotation_type, annotator, date, comment))
        }
        _ => None,
    };
    fields.finish(annotation)
}

/// Collects annotations from the top level and from every element.
///
/// Top-level annotations without an `SPDXID` target the document itself.
pub(super) fn parse_all_annotations(
    document: &Value,
    document_id: Option<&str>,
    logger: &mut Logger,
) -> Vec<Annotation> {
    let fields = Fields::new(document);
    let mut annotations = Vec::new();
    let mut collect = |items: Vec<&Value>, target: Option<&str>| {
        for item in items {
            let target = match target {
                Some(target) => Some(target),
                None if item.get("SPDXID").is_none() => document_id,
                None => None,
            };
            match parse_annotation(item, target) {
                Ok(annotation) => annotations.push(annotation),
                Err(local) => logger.append_element("Annotation", local),
            }
        }
    };
    collect(fields.list("annotations"), None);
    for key in ["packages", "files", "snippets"] {
        for element in fields.list(key) {
            let nested = Fields::new(element);
            let target = element.get("SPDXID").and_then(Value::as_str);
            collect(nested.list("annotations"), target);
        }
    }
    annotations
}

/// Adds the edges implied by `documentDescribes` and `hasFiles`, skipping
/// any whose equivalent is already present.
pub(super) fn add_implied_relationships(document_value: &Value, document: &mut Document) {
    let fields = Fields::new(document_value);
    let root = document.spdx_id().to_string();
    for described in fields.list("documentDescribes") {
        if let Some(id) = described.as_str() {
            document.add_relationship_if_absent(Relationship::new(
                root.clone(),
                RelationshipType::Describes,
                ThreeValued::Value(id.to_string()),
            ));
        }
    }
    for package in fields.list("packages") {
        let Some(package_id) = package.get("SPDXID").and_then(Value::as_str) else {
            continue;
        };
        for file in Fields::new(package).list("hasFiles") {
            if let Some(file_id) = file.as_str() {
                document.add_relationship_if_absent(Relationship::new(
                    package_id,
                    RelationshipType::Contains,
                    ThreeValued::Value(file_id.to_string()),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_relationship_targets() {
        let rel = parse_relationship(&json!({
            "spdxElementId": "SPDXRef-A",
            "relationshipType": "DEPENDS_ON",
            "relatedSpdxElement": "NONE",
            "comment": "none at all"
        }))
        .unwrap();
        assert_eq!(rel.relationship_type, RelationshipType::DependsOn);
        assert_eq!(rel.related_spdx_element_id, ThreeValued::None);
        assert_eq!(rel.comment.as_deref(), Some("none at all"));
    }

    #[test]
    fn test_unknown_relationship_type() {
        let err = parse_relationship(&json!({
            "spdxElementId": "SPDXRef-A",
            "relationshipType": "LIKES",
            "relatedSpdxElement": "SPDXRef-B"
        }))
        .unwrap_err();
        assert_eq!(
            err.messages(),
            &["Error while parsing relationshipType: Invalid value LIKES"]
        );
    }

    #[test]
    fn test_annotation_targets() {
        let annotation = json!({
            "annotator": "Person: Jane",
            "annotationDate": "2023-01-01T00:00:00Z",
            "annotationType": "REVIEW",
            "comment": "ok"
        });
        let document = json!({
            "annotations": [annotation.clone()],
            "packages": [{"SPDXID": "SPDXRef-P", "annotations": [annotation]}]
        });
        let mut logger = Logger::new();
        let annotations = parse_all_annotations(&document, Some("SPDXRef-DOCUMENT"), &mut logger);
        assert!(!logger.has_messages());
        let targets: Vec<&str> = annotations.iter().map(|a| a.spdx_id.as_str()).collect();
        assert_eq!(targets, vec!["SPDXRef-DOCUMENT", "SPDXRef-P"]);
    }
}
