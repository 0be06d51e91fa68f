use super::common::ElementInfo;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    Amends,
    Ancestor,
    Contains,
    Copy,
    DataFile,
    DependsOn,
    Descendant,
    Describes,
    DistributionArtifact,
    Documentation,
    Example,
    ExpandedFromArchive,
    FileAdded,
    FileDeleted,
    FileModified,
    Generates,
    HasConcludedLicense,
    HasDeclaredLicense,
    Metafile,
    OptionalComponent,
    Other,
    Packages,
    Patch,
    RequirementFor,
    SpecificationFor,
    Test,
    TestCase,
    Variant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelationshipCompleteness {
    #[serde(rename = "INCOMPLETE")]
    Incomplete,
    #[serde(rename = "COMPLETE")]
    Complete,
    #[serde(rename = "NOASSERTION")]
    NoAssertion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleScopeType {
    Design,
    Build,
    Development,
    Test,
    Runtime,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SoftwareDependencyLinkType {
    Static,
    Dynamic,
    Tool,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DependencyConditionalityType {
    Optional,
    Required,
    Provided,
    Prerequisite,
    Other,
}

/// A directed edge from one element to a list of others.
///
/// An empty `to` list is qualified by `completeness`: `COMPLETE` means the
/// element has no such relationship, `NOASSERTION` that nothing is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    #[serde(flatten)]
    pub element: ElementInfo,
    #[serde(rename = "from")]
    pub from_element: String,
    pub to: Vec<String>,
    pub relationship_type: RelationshipType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completeness: Option<RelationshipCompleteness>,
}

impl Relationship {
    pub fn new(
        element: ElementInfo,
        from_element: impl Into<String>,
        to: Vec<String>,
        relationship_type: RelationshipType,
    ) -> Self {
        Self {
            element,
            from_element: from_element.into(),
            to,
            relationship_type,
            completeness: None,
        }
    }
}

/// Dependency qualifiers of a [`SoftwareDependencyRelationship`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyParameters {
    #[serde(rename = "scope", skip_serializing_if = "Option::is_none")]
    pub scope: Option<LifecycleScopeType>,
    #[serde(rename = "software_softwareLinkage", skip_serializing_if = "Option::is_none")]
    pub software_linkage: Option<SoftwareDependencyLinkType>,
    #[serde(rename = "software_conditionality", skip_serializing_if = "Option::is_none")]
    pub conditionality: Option<DependencyConditionalityType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoftwareDependencyRelationship {
    #[serde(flatten)]
    pub relationship: Relationship,
    #[serde(flatten)]
    pub parameters: DependencyParameters,
}
