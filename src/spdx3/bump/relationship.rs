use super::Bumper;
use crate::model::{self as spdx2, RelationshipType as Spdx2Type, ThreeValued};
use crate::spdx3::model::{
    DependencyConditionalityType as Conditionality, DependencyParameters, Element, ElementInfo,
    LifecycleScopeType as Scope, Relationship, RelationshipCompleteness, RelationshipType,
    SoftwareDependencyLinkType as Linkage, SoftwareDependencyRelationship,
};
use std::collections::HashMap;

/// How one SPDX 2 relationship type is expressed in SPDX 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipRule {
    pub relationship_type: RelationshipType,
    /// Source and target trade places
    pub swap: bool,
    /// Set for types that become a `SoftwareDependencyRelationship`
    pub dependency: Option<DependencyParameters>,
}

const fn plain(relationship_type: RelationshipType) -> RelationshipRule {
    RelationshipRule {
        relationship_type,
        swap: false,
        dependency: None,
    }
}

const fn swapped(relationship_type: RelationshipType) -> RelationshipRule {
    RelationshipRule {
        relationship_type,
        swap: true,
        dependency: None,
    }
}

const fn dependency(
    scope: Option<Scope>,
    software_linkage: Option<Linkage>,
    conditionality: Option<Conditionality>,
) -> RelationshipRule {
    RelationshipRule {
        relationship_type: RelationshipType::DependsOn,
        swap: false,
        dependency: Some(DependencyParameters {
            scope,
            software_linkage,
            conditionality,
        }),
    }
}

#[must_use]
pub const fn relationship_rule(relationship_type: Spdx2Type) -> RelationshipRule {
    use RelationshipType as T;
    match relationship_type {
        Spdx2Type::Amends => plain(T::Amends),
        Spdx2Type::AncestorOf => plain(T::Ancestor),
        Spdx2Type::Contains => plain(T::Contains),
        Spdx2Type::CopyOf => plain(T::Copy),
        Spdx2Type::DataFileOf => plain(T::DataFile),
        Spdx2Type::DependsOn => plain(T::DependsOn),
        Spdx2Type::Describes => plain(T::Describes),
        Spdx2Type::DistributionArtifact => plain(T::DistributionArtifact),
        Spdx2Type::DocumentationOf => plain(T::Documentation),
        Spdx2Type::ExampleOf => plain(T::Example),
        Spdx2Type::ExpandedFromArchive => plain(T::ExpandedFromArchive),
        Spdx2Type::FileAdded => plain(T::FileAdded),
        Spdx2Type::FileDeleted => plain(T::FileDeleted),
        Spdx2Type::FileModified => plain(T::FileModified),
        Spdx2Type::Generates => plain(T::Generates),
        Spdx2Type::MetafileOf => plain(T::Metafile),
        Spdx2Type::OptionalComponentOf => plain(T::OptionalComponent),
        Spdx2Type::Other => plain(T::Other),
        Spdx2Type::PatchApplied | Spdx2Type::PatchFor => plain(T::Patch),
        Spdx2Type::RequirementDescriptionFor => plain(T::RequirementFor),
        Spdx2Type::SpecificationFor => plain(T::SpecificationFor),
        Spdx2Type::TestCaseOf => plain(T::TestCase),
        Spdx2Type::TestOf => plain(T::Test),
        Spdx2Type::VariantOf => plain(T::Variant),

        Spdx2Type::ContainedBy => swapped(T::Contains),
        Spdx2Type::DependencyOf => swapped(T::DependsOn),
        Spdx2Type::DescendantOf => swapped(T::Ancestor),
        Spdx2Type::DescribedBy => swapped(T::Describes),
        Spdx2Type::GeneratedFrom => swapped(T::Generates),
        Spdx2Type::PackageOf => swapped(T::Packages),

        Spdx2Type::BuildDependencyOf | Spdx2Type::BuildToolOf => {
            dependency(Some(Scope::Build), Some(Linkage::Tool), None)
        }
        Spdx2Type::DependencyManifestOf => dependency(None, None, None),
        Spdx2Type::DevDependencyOf => dependency(Some(Scope::Development), None, None),
        Spdx2Type::DevToolOf => dependency(Some(Scope::Development), Some(Linkage::Tool), None),
        Spdx2Type::DynamicLink => dependency(None, Some(Linkage::Dynamic), None),
        Spdx2Type::HasPrerequisite | Spdx2Type::PrerequisiteFor => {
            dependency(None, None, Some(Conditionality::Prerequisite))
        }
        Spdx2Type::OptionalDependencyOf => dependency(None, None, Some(Conditionality::Optional)),
        Spdx2Type::ProvidedDependencyOf => {
            dependency(Some(Scope::Build), None, Some(Conditionality::Provided))
        }
        Spdx2Type::RuntimeDependencyOf => dependency(Some(Scope::Runtime), None, None),
        Spdx2Type::StaticLink => dependency(None, Some(Linkage::Static), None),
        Spdx2Type::TestDependencyOf => dependency(Some(Scope::Test), None, None),
        Spdx2Type::TestToolOf => dependency(Some(Scope::Test), Some(Linkage::Tool), None),
    }
}

type MergeKey = (String, RelationshipType, Option<DependencyParameters>);

fn base(element: &Element) -> Option<&Relationship> {
    element.as_relationship()
}

fn base_mut(element: &mut Element) -> Option<&mut Relationship> {
    match element {
        Element::Relationship(relationship) => Some(relationship),
        Element::SoftwareDependencyRelationship(dependency) => Some(&mut dependency.relationship),
        _ => None,
    }
}

fn merge_key(element: &Element) -> Option<MergeKey> {
    let relationship = base(element)?;
    if relationship.element.comment.is_some() {
        return None;
    }
    let parameters = match element {
        Element::SoftwareDependencyRelationship(dependency) => Some(dependency.parameters),
        _ => None,
    };
    Some((
        relationship.from_element.clone(),
        relationship.relationship_type,
        parameters,
    ))
}

impl Bumper<'_> {
    pub(super) fn bump_relationship(&mut self, relationship: &spdx2::Relationship) {
        let rule = relationship_rule(relationship.relationship_type);
        let source = self.element_id(&relationship.spdx_element_id);
        let (from_element, to, completeness) = match &relationship.related_spdx_element_id {
            ThreeValued::Value(target) if rule.swap => {
                (self.element_id(target), vec![source], None)
            }
            ThreeValued::Value(target) => (source, vec![self.element_id(target)], None),
            _ if rule.swap => {
                self.missing_conversion(
                    &format!(
                        "relationship {} {} {}",
                        relationship.spdx_element_id,
                        relationship.relationship_type,
                        relationship.related_spdx_element_id
                    ),
                    "a swapped relationship needs a concrete target",
                );
                return;
            }
            ThreeValued::NoAssertion => {
                (source, Vec::new(), Some(RelationshipCompleteness::NoAssertion))
            }
            ThreeValued::None => (source, Vec::new(), Some(RelationshipCompleteness::Complete)),
        };

        let mut element = ElementInfo::new(self.next_relationship_id(), self.creation_info.clone());
        element.comment = relationship.comment.clone();
        let mut bumped = Relationship::new(element, from_element, to, rule.relationship_type);
        bumped.completeness = completeness;

        self.relationships.push(match rule.dependency {
            Some(parameters) => {
                Element::SoftwareDependencyRelationship(SoftwareDependencyRelationship {
                    relationship: bumped,
                    parameters,
                })
            }
            None => Element::Relationship(bumped),
        });
    }

    /// Folds comment-less relationships sharing source, type and dependency
    /// parameters into the first of them.
    ///
    /// Targets are appended in input order and a target already present is
    /// dropped, so repeated SPDX 2 relationships collapse into one target.
    /// The first relationship keeps its id and completeness.
    pub(super) fn merge_relationships(&mut self) -> Vec<Element> {
        let pending = std::mem::take(&mut self.relationships);
        let mut merged: Vec<Element> = Vec::with_capacity(pending.len());
        let mut positions: HashMap<MergeKey, usize> = HashMap::new();

        for element in pending {
            let Some(key) = merge_key(&element) else {
                merged.push(element);
                continue;
            };
            let Some(&position) = positions.get(&key) else {
                positions.insert(key, merged.len());
                merged.push(element);
                continue;
            };
            let Some(incoming) = base(&element) else {
                continue;
            };
            let Some(existing) = base_mut(&mut merged[position]) else {
                continue;
            };
            if existing.completeness != incoming.completeness {
                let message = format!(
                    "relationships {} and {} from {} disagree on completeness; keeping {:?}",
                    existing.element.spdx_id,
                    incoming.element.spdx_id,
                    existing.from_element,
                    existing.completeness
                );
                self.warn(message);
            }
            for target in &incoming.to {
                if !existing.to.contains(target) {
                    existing.to.push(target.clone());
                }
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::document;
    use super::*;
    use crate::spdx3::bump::bump_document;

    fn relationships(document: &spdx2::Document) -> (Vec<Element>, Vec<String>) {
        let result = bump_document(document);
        let relationships = result
            .payload
            .elements()
            .filter(|element| element.as_relationship().is_some())
            .cloned()
            .collect();
        (relationships, result.warnings)
    }

    fn push(document: &mut spdx2::Document, from: &str, kind: Spdx2Type, to: ThreeValued<String>) {
        document.relationships.push(spdx2::Relationship::new(from, kind, to));
    }

    #[test]
    fn test_every_type_has_a_rule() {
        let rule = relationship_rule(Spdx2Type::PackageOf);
        assert!(rule.swap);
        assert_eq!(rule.relationship_type, RelationshipType::Packages);
        let rule = relationship_rule(Spdx2Type::DevToolOf);
        assert_eq!(rule.relationship_type, RelationshipType::DependsOn);
        assert_eq!(
            rule.dependency,
            Some(DependencyParameters {
                scope: Some(Scope::Development),
                software_linkage: Some(Linkage::Tool),
                conditionality: None,
            })
        );
    }

    #[test]
    fn test_contained_by_is_swapped() {
        let mut document = document();
        document.relationships.clear();
        push(
            &mut document,
            "SPDXRef-F",
            Spdx2Type::ContainedBy,
            ThreeValued::Value("SPDXRef-P".to_string()),
        );
        let (relationships, _) = relationships(&document);
        let relationship = relationships[0].as_relationship().unwrap();
        assert_eq!(relationship.relationship_type, RelationshipType::Contains);
        assert_eq!(relationship.from_element, "https://x/y#SPDXRef-P");
        assert_eq!(relationship.to, ["https://x/y#SPDXRef-F"]);
    }

    #[test]
    fn test_build_dependency_becomes_dependency_relationship() {
        let mut document = document();
        document.relationships.clear();
        push(
            &mut document,
            "SPDXRef-A",
            Spdx2Type::BuildDependencyOf,
            ThreeValued::Value("SPDXRef-B".to_string()),
        );
        let (relationships, _) = relationships(&document);
        let Element::SoftwareDependencyRelationship(dependency) = &relationships[0] else {
            panic!("expected a dependency relationship");
        };
        assert_eq!(dependency.relationship.relationship_type, RelationshipType::DependsOn);
        assert_eq!(dependency.parameters.scope, Some(Scope::Build));
        assert_eq!(dependency.parameters.software_linkage, Some(Linkage::Tool));
        let value = serde_json::to_value(&relationships[0]).unwrap();
        assert_eq!(value["type"], "software_SoftwareDependencyRelationship");
        assert_eq!(value["software_softwareLinkage"], "TOOL");
    }

    #[test]
    fn test_same_source_and_type_are_merged() {
        let mut document = document();
        document.relationships.clear();
        for target in ["SPDXRef-B", "SPDXRef-C", "SPDXRef-B"] {
            push(
                &mut document,
                "SPDXRef-A",
                Spdx2Type::DependsOn,
                ThreeValued::Value(target.to_string()),
            );
        }
        document.relationships.push(
            spdx2::Relationship::new(
                "SPDXRef-A",
                Spdx2Type::DependsOn,
                ThreeValued::Value("SPDXRef-D".to_string()),
            )
            .with_comment("pinned"),
        );
        let (relationships, _) = relationships(&document);
        assert_eq!(relationships.len(), 2);
        let merged = relationships[0].as_relationship().unwrap();
        assert_eq!(merged.element.spdx_id, "https://x/y#SPDXRef-Relationship-1");
        assert_eq!(merged.to, ["https://x/y#SPDXRef-B", "https://x/y#SPDXRef-C"]);
        let commented = relationships[1].as_relationship().unwrap();
        assert_eq!(commented.element.comment.as_deref(), Some("pinned"));
    }

    #[test]
    fn test_empty_targets_carry_completeness() {
        let mut document = document();
        document.relationships.clear();
        push(&mut document, "SPDXRef-A", Spdx2Type::Contains, ThreeValued::None);
        push(&mut document, "SPDXRef-B", Spdx2Type::DependsOn, ThreeValued::NoAssertion);
        let (relationships, _) = relationships(&document);
        let none = relationships[0].as_relationship().unwrap();
        assert!(none.to.is_empty());
        assert_eq!(none.completeness, Some(RelationshipCompleteness::Complete));
        let no_assertion = relationships[1].as_relationship().unwrap();
        assert_eq!(no_assertion.completeness, Some(RelationshipCompleteness::NoAssertion));
    }

    #[test]
    fn test_swapped_without_target_is_dropped() {
        let mut document = document();
        document.relationships.clear();
        push(&mut document, "SPDXRef-A", Spdx2Type::DependencyOf, ThreeValued::NoAssertion);
        let (relationships, warnings) = relationships(&document);
        assert!(relationships.is_empty());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("DEPENDENCY_OF"));
    }
}
