//! Software profile: packages, files and snippets.

use super::common::ElementInfo;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SoftwarePurpose {
    Application,
    Archive,
    Bom,
    Container,
    Data,
    Device,
    Documentation,
    Executable,
    File,
    Firmware,
    Framework,
    Install,
    Library,
    OperatingSystem,
    Other,
    Source,
}

/// Fields shared by packages, files and snippets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareArtifact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplied_by: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub originated_by: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub built_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until_time: Option<DateTime<Utc>>,
    #[serde(rename = "software_primaryPurpose", skip_serializing_if = "Option::is_none")]
    pub primary_purpose: Option<SoftwarePurpose>,
    #[serde(rename = "software_additionalPurpose", skip_serializing_if = "Vec::is_empty")]
    pub additional_purpose: Vec<SoftwarePurpose>,
    #[serde(rename = "software_copyrightText", skip_serializing_if = "Option::is_none")]
    pub copyright_text: Option<String>,
    #[serde(rename = "software_attributionText", skip_serializing_if = "Vec::is_empty")]
    pub attribution_text: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    #[serde(flatten)]
    pub element: ElementInfo,
    #[serde(flatten)]
    pub artifact: SoftwareArtifact,
    #[serde(rename = "software_packageVersion", skip_serializing_if = "Option::is_none")]
    pub package_version: Option<String>,
    #[serde(rename = "software_downloadLocation", skip_serializing_if = "Option::is_none")]
    pub download_location: Option<String>,
    #[serde(rename = "software_packageUrl", skip_serializing_if = "Option::is_none")]
    pub package_url: Option<String>,
    #[serde(rename = "software_homePage", skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(rename = "software_sourceInfo", skip_serializing_if = "Option::is_none")]
    pub source_info: Option<String>,
}

impl Package {
    pub fn new(element: ElementInfo) -> Self {
        Self {
            element,
            artifact: SoftwareArtifact::default(),
            package_version: None,
            download_location: None,
            package_url: None,
            homepage: None,
            source_info: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct File {
    #[serde(flatten)]
    pub element: ElementInfo,
    #[serde(flatten)]
    pub artifact: SoftwareArtifact,
}

/// Inclusive `begin..=end` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositiveIntegerRange {
    pub begin_integer: u64,
    pub end_integer: u64,
}

impl From<(u64, u64)> for PositiveIntegerRange {
    fn from((begin_integer, end_integer): (u64, u64)) -> Self {
        Self {
            begin_integer,
            end_integer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    #[serde(flatten)]
    pub element: ElementInfo,
    #[serde(flatten)]
    pub artifact: SoftwareArtifact,
    #[serde(rename = "software_snippetFromFile")]
    pub snippet_from_file: String,
    #[serde(rename = "software_byteRange")]
    pub byte_range: PositiveIntegerRange,
    #[serde(rename = "software_lineRange", skip_serializing_if = "Option::is_none")]
    pub line_range: Option<PositiveIntegerRange>,
}
