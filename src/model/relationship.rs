use super::{RelationshipType, ThreeValued};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub spdx_element_id: String,
    pub relationship_type: RelationshipType,
    /// A local id, a `DocumentRef-X:SPDXRef-Y` id, or one of the singletons
    pub related_spdx_element_id: ThreeValued<String>,
    pub comment: Option<String>,
}

impl Relationship {
    pub fn new(
        spdx_element_id: impl Into<String>,
        relationship_type: RelationshipType,
        related_spdx_element_id: ThreeValued<String>,
    ) -> Self {
        Self {
            spdx_element_id: spdx_element_id.into(),
            relationship_type,
            related_spdx_element_id,
            comment: None,
        }
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Same edge ignoring comments, either as written or in inverse form.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        if self.spdx_element_id == other.spdx_element_id
            && self.relationship_type == other.relationship_type
            && self.related_spdx_element_id == other.related_spdx_element_id
        {
            return true;
        }
        match (self.relationship_type.inverse(), &other.related_spdx_element_id) {
            (Some(inverse), ThreeValued::Value(other_target)) => {
                inverse == other.relationship_type
                    && *other_target == self.spdx_element_id
                    && self.related_spdx_element_id.value() == Some(&other.spdx_element_id)
            }
            _ => false,
        }
    }

    /// Whether this is `source CONTAINS target` in either direction.
    #[must_use]
    pub fn is_containment(&self, container: &str, contained: &str) -> bool {
        match self.relationship_type {
            RelationshipType::Contains => {
                self.spdx_element_id == container
                    && self.related_spdx_element_id.value().map(String::as_str) == Some(contained)
            }
            RelationshipType::ContainedBy => {
                self.spdx_element_id == contained
                    && self.related_spdx_element_id.value().map(String::as_str) == Some(container)
            }
            _ => false,
        }
    }
}
