//! The SPDX 3 element model produced by the bump.
//!
//! SPDX 3 has no containing document object: a [`Payload`] is a flat map
//! from element id to [`Element`], and elements refer to each other by id.

mod common;
mod licensing;
mod relationship;
mod software;

pub use common::*;
pub use licensing::*;
pub use relationship::*;
pub use software::*;

use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::warn;

/// JSON-LD context of the serialized payload.
pub const SPDX3_CONTEXT: &str = "https://spdx.org/rdf/3.0.1/spdx-context.jsonld";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Element {
    Person(Agent),
    Organization(Agent),
    Tool(Agent),
    SpdxDocument(SpdxDocument),
    Annotation(Annotation),
    Relationship(Relationship),
    #[serde(rename = "software_SoftwareDependencyRelationship")]
    SoftwareDependencyRelationship(SoftwareDependencyRelationship),
    #[serde(rename = "software_Package")]
    Package(Package),
    #[serde(rename = "software_File")]
    File(File),
    #[serde(rename = "software_Snippet")]
    Snippet(Snippet),
    #[serde(rename = "simplelicensing_LicenseExpression")]
    LicenseExpression(LicenseExpression),
    #[serde(rename = "simplelicensing_SimpleLicensingText")]
    SimpleLicensingText(SimpleLicensingText),
}

impl Element {
    pub fn info(&self) -> &ElementInfo {
        match self {
            Self::Person(agent) | Self::Organization(agent) | Self::Tool(agent) => &agent.element,
            Self::SpdxDocument(document) => &document.element,
            Self::Annotation(annotation) => &annotation.element,
            Self::Relationship(relationship) => &relationship.element,
            Self::SoftwareDependencyRelationship(dependency) => &dependency.relationship.element,
            Self::Package(package) => &package.element,
            Self::File(file) => &file.element,
            Self::Snippet(snippet) => &snippet.element,
            Self::LicenseExpression(license) => &license.element,
            Self::SimpleLicensingText(text) => &text.element,
        }
    }

    pub fn spdx_id(&self) -> &str {
        &self.info().spdx_id
    }

    /// Type name as it appears in the serialized payload.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Person(_) => "Person",
            Self::Organization(_) => "Organization",
            Self::Tool(_) => "Tool",
            Self::SpdxDocument(_) => "SpdxDocument",
            Self::Annotation(_) => "Annotation",
            Self::Relationship(_) => "Relationship",
            Self::SoftwareDependencyRelationship(_) => "software_SoftwareDependencyRelationship",
            Self::Package(_) => "software_Package",
            Self::File(_) => "software_File",
            Self::Snippet(_) => "software_Snippet",
            Self::LicenseExpression(_) => "simplelicensing_LicenseExpression",
            Self::SimpleLicensingText(_) => "simplelicensing_SimpleLicensingText",
        }
    }

    /// The relationship part of plain and dependency relationships.
    pub fn as_relationship(&self) -> Option<&Relationship> {
        match self {
            Self::Relationship(relationship) => Some(relationship),
            Self::SoftwareDependencyRelationship(dependency) => Some(&dependency.relationship),
            _ => None,
        }
    }
}

/// Elements keyed by spdx_id, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    elements: IndexMap<String, Element>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `element`, replacing any element with the same id.
    pub fn add_element(&mut self, element: Element) {
        let spdx_id = element.spdx_id().to_string();
        if let Some(previous) = self.elements.insert(spdx_id.clone(), element) {
            warn!(spdx_id = %spdx_id, replaced = previous.type_name(), "duplicate SPDX 3 element id");
        }
    }

    pub fn get_element(&self, spdx_id: &str) -> Option<&Element> {
        self.elements.get(spdx_id)
    }

    pub fn get_element_mut(&mut self, spdx_id: &str) -> Option<&mut Element> {
        self.elements.get_mut(spdx_id)
    }

    pub fn contains(&self, spdx_id: &str) -> bool {
        self.elements.contains_key(spdx_id)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Serialized as a JSON-LD document: `{"@context": …, "@graph": [elements]}`.
impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let graph: Vec<&Element> = self.elements.values().collect();
        let mut state = serializer.serialize_struct("Payload", 2)?;
        state.serialize_field("@context", SPDX3_CONTEXT)?;
        state.serialize_field("@graph", &graph)?;
        state.end()
    }
}
