use super::graph::{spdx, Graph, Term, NOASSERTION_URI, NONE_URI, RDFS_COMMENT};
use super::node::{IdResolver, Properties};
use crate::logger::Logger;
use crate::model::datetime::parse_datetime;
use crate::model::{
    Actor, Annotation, AnnotationType, Document, Relationship, RelationshipType, ThreeValued,
};

fn subject_id(subject: &Term, ids: &IdResolver) -> Result<String, String> {
    match subject {
        Term::Iri(uri) => Ok(ids.to_spdx_id(uri)),
        other => Err(format!("{other} must be identified by a URI")),
    }
}

/// Reads one `spdx:Relationship` node held by `parent`.
pub(super) fn parse_relationship(
    graph: &Graph,
    parent: &Term,
    node: &Term,
    ids: &IdResolver,
) -> Result<Relationship, Logger> {
    let mut props = Properties::new(graph, node, ids);
    let spdx_element_id = match subject_id(parent, ids) {
        Ok(id) => Some(id),
        Err(message) => {
            props.logger.append(format!("spdxElementId: {message}"));
            None
        }
    };
    let relationship_type = if props.object(&spdx("relationshipType")).is_some() {
        props.enumeration::<RelationshipType>(&spdx("relationshipType"))
    } else {
        props.missing(&spdx("relationshipType"));
        None
    };
    let related = match props.object(&spdx("relatedSpdxElement")) {
        Some(Term::Iri(uri)) if uri == NOASSERTION_URI => Some(ThreeValued::NoAssertion),
        Some(Term::Iri(uri)) if uri == NONE_URI => Some(ThreeValued::None),
        Some(Term::Literal(text)) => Some(ThreeValued::parse_str(text)),
        Some(_) => props.reference(&spdx("relatedSpdxElement")).map(ThreeValued::Value),
        None => {
            props.missing(&spdx("relatedSpdxElement"));
            None
        }
    };
    let comment = props.literal(RDFS_COMMENT);

    let relationship = match (spdx_element_id, relationship_type, related) {
        (Some(from), Some(relationship_type), Some(related)) => {
            let mut relationship = Relationship::new(from, relationship_type, related);
            relationship.comment = comment;
            Some(relationship)
        }
        _ => None,
    };
    props.finish(relationship)
}

/// Reads one `spdx:Annotation` node held by `parent`, the annotated element.
pub(super) fn parse_annotation(
    graph: &Graph,
    parent: &Term,
    node: &Term,
    ids: &IdResolver,
) -> Result<Annotation, Logger> {
    let mut props = Properties::new(graph, node, ids);
    let spdx_id = match subject_id(parent, ids) {
        Ok(id) => Some(id),
        Err(message) => {
            props.logger.append(format!("SPDXID: {message}"));
            None
        }
    };
    let annotation_type = if props.object(&spdx("annotationType")).is_some() {
        props.enumeration::<AnnotationType>(&spdx("annotationType"))
    } else {
        props.missing(&spdx("annotationType"));
        None
    };
    let annotator = match props.required_literal(&spdx("annotator")) {
        Some(raw) => props.check(&spdx("annotator"), raw.parse::<Actor>()),
        None => None,
    };
    let annotation_date = match props.required_literal(&spdx("annotationDate")) {
        Some(raw) => props.check(&spdx("annotationDate"), parse_datetime(&raw)),
        None => None,
    };
    let comment = props.literal(RDFS_COMMENT);
    if comment.is_none() {
        props.missing(RDFS_COMMENT);
    }

    let annotation = match (spdx_id, annotation_type, annotator, annotation_date, comment) {
        (Some(id), Some(kind), Some(annotator), Some(date), Some(comment)) => {
            Some(Annotation::new(id, kind, annotator, date, comment))
        }
        _ => None,
    };
    props.finish(annotation)
}

/// Adds `DESCRIBES` edges for `spdx:describesPackage` and `CONTAINS` edges
/// for `spdx:hasFile` unless an equivalent relationship is present.
pub(super) fn add_implied_relationships(graph: &Graph, ids: &IdResolver, document: &mut Document) {
    let root = document.spdx_id().to_string();
    for triple in graph.with_predicate(&spdx("describesPackage")) {
        if let Some(uri) = triple.object.as_iri() {
            document.add_relationship_if_absent(Relationship::new(
                root.clone(),
                RelationshipType::Describes,
                ThreeValued::Value(ids.to_spdx_id(uri)),
            ));
        }
    }
    for triple in graph.with_predicate(&spdx("hasFile")) {
        if let (Some(package), Some(file)) = (triple.subject.as_iri(), triple.object.as_iri()) {
            document.add_relationship_if_absent(Relationship::new(
                ids.to_spdx_id(package),
                RelationshipType::Contains,
                ThreeValued::Value(ids.to_spdx_id(file)),
            ));
        }
    }
}
