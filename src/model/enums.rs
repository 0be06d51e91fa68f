//! SPDX 2 enumerations and their per-format spellings.
//!
//! Every enum is described once by its canonical `UPPER_SNAKE` names. The
//! tag-value, JSON and RDF spellings are derived from that table by
//! [`SpdxEnum`], so no codec hard-codes its own mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shared name table for the SPDX enumerations.
pub trait SpdxEnum: Sized + Copy + PartialEq + 'static {
    /// Canonical `UPPER_SNAKE` name of every variant, in declaration order.
    const VARIANTS: &'static [(Self, &'static str)];
    /// Prefix of the RDF individual, e.g. `relationshipType`.
    const RDF_PREFIX: &'static str;
    /// Whether tag-value writes `OPERATING-SYSTEM` instead of `OPERATING_SYSTEM`.
    const TAG_VALUE_DASHES: bool = false;

    fn name(&self) -> &'static str {
        Self::VARIANTS
            .iter()
            .find(|(variant, _)| variant == self)
            .map_or("", |(_, name)| name)
    }

    /// Spelling used by JSON, YAML and XML.
    fn json_name(&self) -> &'static str {
        self.name()
    }

    fn tag_value_name(&self) -> String {
        if Self::TAG_VALUE_DASHES {
            self.name().replace('_', "-")
        } else {
            self.name().to_string()
        }
    }

    /// Fragment of the RDF individual, e.g. `relationshipType_dependsOn`.
    fn rdf_fragment(&self) -> String {
        format!("{}_{}", Self::RDF_PREFIX, snake_to_camel(self.name()))
    }

    /// Accepts either spelling; `-` and `_` are interchangeable, case is ignored.
    fn parse_name(raw: &str) -> Option<Self> {
        let wanted = raw.trim().replace('-', "_").to_uppercase();
        Self::VARIANTS
            .iter()
            .find(|(_, name)| *name == wanted)
            .map(|(variant, _)| *variant)
    }

    fn from_rdf_fragment(fragment: &str) -> Option<Self> {
        let local = fragment.strip_prefix(Self::RDF_PREFIX)?.strip_prefix('_')?;
        Self::VARIANTS
            .iter()
            .find(|(_, name)| snake_to_camel(name) == local)
            .map(|(variant, _)| *variant)
    }
}

/// `OPERATING_SYSTEM` -> `operatingSystem`.
#[must_use]
pub fn snake_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, part) in name.split('_').enumerate() {
        let lower = part.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
        } else {
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}

// ============================================================================
// Relationship types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RelationshipType {
    Amends,
    AncestorOf,
    BuildDependencyOf,
    BuildToolOf,
    ContainedBy,
    Contains,
    CopyOf,
    DataFileOf,
    DependencyManifestOf,
    DependencyOf,
    DependsOn,
    DescendantOf,
    DescribedBy,
    Describes,
    DevDependencyOf,
    DevToolOf,
    DistributionArtifact,
    DocumentationOf,
    DynamicLink,
    ExampleOf,
    ExpandedFromArchive,
    FileAdded,
    FileDeleted,
    FileModified,
    GeneratedFrom,
    Generates,
    HasPrerequisite,
    MetafileOf,
    OptionalComponentOf,
    OptionalDependencyOf,
    Other,
    PackageOf,
    PatchApplied,
    PatchFor,
    PrerequisiteFor,
    ProvidedDependencyOf,
    RequirementDescriptionFor,
    RuntimeDependencyOf,
    SpecificationFor,
    StaticLink,
    TestCaseOf,
    TestDependencyOf,
    TestOf,
    TestToolOf,
    VariantOf,
}

impl SpdxEnum for RelationshipType {
    const RDF_PREFIX: &'static str = "relationshipType";
    const VARIANTS: &'static [(Self, &'static str)] = &[
        (Self::Amends, "AMENDS"),
        (Self::AncestorOf, "ANCESTOR_OF"),
        (Self::BuildDependencyOf, "BUILD_DEPENDENCY_OF"),
        (Self::BuildToolOf, "BUILD_TOOL_OF"),
        (Self::ContainedBy, "CONTAINED_BY"),
        (Self::Contains, "CONTAINS"),
        (Self::CopyOf, "COPY_OF"),
        (Self::DataFileOf, "DATA_FILE_OF"),
        (Self::DependencyManifestOf, "DEPENDENCY_MANIFEST_OF"),
        (Self::DependencyOf, "DEPENDENCY_OF"),
        (Self::DependsOn, "DEPENDS_ON"),
        (Self::DescendantOf, "DESCENDANT_OF"),
        (Self::DescribedBy, "DESCRIBED_BY"),
        (Self::Describes, "DESCRIBES"),
        (Self::DevDependencyOf, "DEV_DEPENDENCY_OF"),
        (Self::DevToolOf, "DEV_TOOL_OF"),
        (Self::DistributionArtifact, "DISTRIBUTION_ARTIFACT"),
        (Self::DocumentationOf, "DOCUMENTATION_OF"),
        (Self::DynamicLink, "DYNAMIC_LINK"),
        (Self::ExampleOf, "EXAMPLE_OF"),
        (Self::ExpandedFromArchive, "EXPANDED_FROM_ARCHIVE"),
        (Self::FileAdded, "FILE_ADDED"),
        (Self::FileDeleted, "FILE_DELETED"),
        (Self::FileModified, "FILE_MODIFIED"),
        (Self::GeneratedFrom, "GENERATED_FROM"),
        (Self::Generates, "GENERATES"),
        (Self::HasPrerequisite, "HAS_PREREQUISITE"),
        (Self::MetafileOf, "METAFILE_OF"),
        (Self::OptionalComponentOf, "OPTIONAL_COMPONENT_OF"),
        (Self::OptionalDependencyOf, "OPTIONAL_DEPENDENCY_OF"),
        (Self::Other, "OTHER"),
        (Self::PackageOf, "PACKAGE_OF"),
        (Self::PatchApplied, "PATCH_APPLIED"),
        (Self::PatchFor, "PATCH_FOR"),
        (Self::PrerequisiteFor, "PREREQUISITE_FOR"),
        (Self::ProvidedDependencyOf, "PROVIDED_DEPENDENCY_OF"),
        (Self::RequirementDescriptionFor, "REQUIREMENT_DESCRIPTION_FOR"),
        (Self::RuntimeDependencyOf, "RUNTIME_DEPENDENCY_OF"),
        (Self::SpecificationFor, "SPECIFICATION_FOR"),
        (Self::StaticLink, "STATIC_LINK"),
        (Self::TestCaseOf, "TEST_CASE_OF"),
        (Self::TestDependencyOf, "TEST_DEPENDENCY_OF"),
        (Self::TestOf, "TEST_OF"),
        (Self::TestToolOf, "TEST_TOOL_OF"),
        (Self::VariantOf, "VARIANT_OF"),
    ];
}

impl RelationshipType {
    /// The type with source and target swapped, where SPDX 2 defines one.
    #[must_use]
    pub const fn inverse(&self) -> Option<Self> {
        match self {
            Self::Contains => Some(Self::ContainedBy),
            Self::ContainedBy => Some(Self::Contains),
            Self::Describes => Some(Self::DescribedBy),
            Self::DescribedBy => Some(Self::Describes),
            Self::DependsOn => Some(Self::DependencyOf),
            Self::DependencyOf => Some(Self::DependsOn),
            Self::Generates => Some(Self::GeneratedFrom),
            Self::GeneratedFrom => Some(Self::Generates),
            Self::HasPrerequisite => Some(Self::PrerequisiteFor),
            Self::PrerequisiteFor => Some(Self::HasPrerequisite),
            _ => None,
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// File types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FileType {
    Source,
    Binary,
    Archive,
    Application,
    Audio,
    Image,
    Text,
    Video,
    Documentation,
    Spdx,
    Other,
}

impl SpdxEnum for FileType {
    const RDF_PREFIX: &'static str = "fileType";
    const VARIANTS: &'static [(Self, &'static str)] = &[
        (Self::Source, "SOURCE"),
        (Self::Binary, "BINARY"),
        (Self::Archive, "ARCHIVE"),
        (Self::Application, "APPLICATION"),
        (Self::Audio, "AUDIO"),
        (Self::Image, "IMAGE"),
        (Self::Text, "TEXT"),
        (Self::Video, "VIDEO"),
        (Self::Documentation, "DOCUMENTATION"),
        (Self::Spdx, "SPDX"),
        (Self::Other, "OTHER"),
    ];
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Package purposes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrimaryPackagePurpose {
    Application,
    Framework,
    Library,
    Container,
    OperatingSystem,
    Device,
    Firmware,
    Source,
    Archive,
    File,
    Install,
    Other,
}

impl SpdxEnum for PrimaryPackagePurpose {
    const RDF_PREFIX: &'static str = "purpose";
    const TAG_VALUE_DASHES: bool = true;
    const VARIANTS: &'static [(Self, &'static str)] = &[
        (Self::Application, "APPLICATION"),
        (Self::Framework, "FRAMEWORK"),
        (Self::Library, "LIBRARY"),
        (Self::Container, "CONTAINER"),
        (Self::OperatingSystem, "OPERATING_SYSTEM"),
        (Self::Device, "DEVICE"),
        (Self::Firmware, "FIRMWARE"),
        (Self::Source, "SOURCE"),
        (Self::Archive, "ARCHIVE"),
        (Self::File, "FILE"),
        (Self::Install, "INSTALL"),
        (Self::Other, "OTHER"),
    ];
}

impl fmt::Display for PrimaryPackagePurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// External package reference categories
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExternalPackageRefCategory {
    Security,
    PackageManager,
    PersistentId,
    Other,
}

impl SpdxEnum for ExternalPackageRefCategory {
    const RDF_PREFIX: &'static str = "referenceCategory";
    const TAG_VALUE_DASHES: bool = true;
    const VARIANTS: &'static [(Self, &'static str)] = &[
        (Self::Security, "SECURITY"),
        (Self::PackageManager, "PACKAGE_MANAGER"),
        (Self::PersistentId, "PERSISTENT_ID"),
        (Self::Other, "OTHER"),
    ];
}

impl fmt::Display for ExternalPackageRefCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Annotation types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnnotationType {
    Review,
    Other,
}

impl SpdxEnum for AnnotationType {
    const RDF_PREFIX: &'static str = "annotationType";
    const VARIANTS: &'static [(Self, &'static str)] =
        &[(Self::Review, "REVIEW"), (Self::Other, "OTHER")];
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_spellings() {
        let purpose = PrimaryPackagePurpose::OperatingSystem;
        assert_eq!(purpose.tag_value_name(), "OPERATING-SYSTEM");
        assert_eq!(purpose.json_name(), "OPERATING_SYSTEM");
        assert_eq!(purpose.rdf_fragment(), "purpose_operatingSystem");
        assert_eq!(
            PrimaryPackagePurpose::parse_name("OPERATING-SYSTEM"),
            Some(purpose)
        );
        assert_eq!(
            PrimaryPackagePurpose::parse_name("OPERATING_SYSTEM"),
            Some(purpose)
        );
    }

    #[test]
    fn test_relationship_rdf_fragments() {
        assert_eq!(
            RelationshipType::DependsOn.rdf_fragment(),
            "relationshipType_dependsOn"
        );
        assert_eq!(
            RelationshipType::from_rdf_fragment("relationshipType_buildDependencyOf"),
            Some(RelationshipType::BuildDependencyOf)
        );
        assert_eq!(RelationshipType::from_rdf_fragment("fileType_source"), None);
    }

    #[test]
    fn test_all_variants_round_trip() {
        for (variant, name) in RelationshipType::VARIANTS {
            assert_eq!(RelationshipType::parse_name(name), Some(*variant));
            assert_eq!(
                RelationshipType::from_rdf_fragment(&variant.rdf_fragment()),
                Some(*variant)
            );
        }
        for (variant, _) in ExternalPackageRefCategory::VARIANTS {
            assert_eq!(
                ExternalPackageRefCategory::parse_name(&variant.tag_value_name()),
                Some(*variant)
            );
        }
    }

    #[test]
    fn test_category_spellings() {
        let category = ExternalPackageRefCategory::PackageManager;
        assert_eq!(category.tag_value_name(), "PACKAGE-MANAGER");
        assert_eq!(category.json_name(), "PACKAGE_MANAGER");
        assert_eq!(category.rdf_fragment(), "referenceCategory_packageManager");
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(FileType::parse_name("EXECUTABLE"), None);
        assert_eq!(AnnotationType::parse_name("review"), Some(AnnotationType::Review));
    }

    #[test]
    fn test_inverse_is_symmetric() {
        for (variant, _) in RelationshipType::VARIANTS {
            if let Some(inverse) = variant.inverse() {
                assert_eq!(inverse.inverse(), Some(*variant));
            }
        }
    }
}
