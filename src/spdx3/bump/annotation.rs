use super::Bumper;
use crate::model::{self as spdx2, ActorType, AnnotationType as Spdx2AnnotationType};
use crate::spdx3::model::{Annotation, AnnotationType, Element, ElementInfo};

impl Bumper<'_> {
    /// The annotator and date move into the annotation's own creation info.
    pub(super) fn bump_annotation(&mut self, annotation: &spdx2::Annotation) {
        self.annotation_count += 1;
        let spdx_id = format!(
            "{}#SPDXRef-Annotation-{}",
            self.namespace, self.annotation_count
        );

        let annotator = self.intern_actor(&annotation.annotator);
        let mut creation_info = self.creation_info.clone();
        creation_info.created = annotation.annotation_date;
        if annotation.annotator.actor_type == ActorType::Tool {
            creation_info.created_by = Vec::new();
            creation_info.created_using = vec![annotator];
        } else {
            creation_info.created_by = vec![annotator];
            creation_info.created_using = Vec::new();
        }

        let annotation_type = match annotation.annotation_type {
            Spdx2AnnotationType::Review => AnnotationType::Review,
            Spdx2AnnotationType::Other => AnnotationType::Other,
        };
        self.payload.add_element(Element::Annotation(Annotation {
            element: ElementInfo::new(spdx_id, creation_info),
            annotation_type,
            subject: self.element_id(&annotation.spdx_id),
            statement: Some(annotation.annotation_comment.clone()),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::document;
    use super::*;
    use crate::model::datetime::parse_datetime;
    use crate::model::Actor;
    use crate::spdx3::bump::bump_document;

    #[test]
    fn test_annotation_carries_annotator_and_date() {
        let mut document = document();
        document.annotations.push(spdx2::Annotation::new(
            "SPDXRef-P",
            Spdx2AnnotationType::Review,
            Actor::person("Joe Reviewer", None).unwrap(),
            parse_datetime("2023-01-15T10:00:00Z").unwrap(),
            "looks good",
        ));
        document.annotations.push(spdx2::Annotation::new(
            "SPDXRef-DOCUMENT",
            Spdx2AnnotationType::Other,
            Actor::tool("scanner").unwrap(),
            parse_datetime("2023-01-16T10:00:00Z").unwrap(),
            "scanned",
        ));

        let result = bump_document(&document);
        let Some(Element::Annotation(review)) =
            result.payload.get_element("https://x/y#SPDXRef-Annotation-1")
        else {
            panic!("missing annotation");
        };
        assert_eq!(review.subject, "https://x/y#SPDXRef-P");
        assert_eq!(review.statement.as_deref(), Some("looks good"));
        assert_eq!(review.annotation_type, AnnotationType::Review);
        assert_eq!(
            review.element.creation_info.created_by,
            ["https://x/y#SPDXRef-Actor-JoeReviewer"]
        );
        assert_eq!(
            review.element.creation_info.created,
            parse_datetime("2023-01-15T10:00:00Z").unwrap()
        );

        let Some(Element::Annotation(scan)) =
            result.payload.get_element("https://x/y#SPDXRef-Annotation-2")
        else {
            panic!("missing annotation");
        };
        assert!(scan.element.creation_info.created_by.is_empty());
        assert_eq!(
            scan.element.creation_info.created_using,
            ["https://x/y#SPDXRef-Actor-scanner"]
        );
    }
}
