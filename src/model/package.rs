use super::{
    Actor, Checksum, ExternalPackageRefCategory, LicenseExpression, PrimaryPackagePurpose,
    ThreeValued,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// SHA1 over the package's files, with the files left out of the computation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageVerificationCode {
    /// 40 lowercase hex digits
    pub value: String,
    /// Relative paths starting with `./`
    pub excluded_files: Vec<String>,
}

impl PackageVerificationCode {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            excluded_files: Vec::new(),
        }
    }
}

/// A pointer to the package in some external system (CPE, purl, swh, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalPackageRef {
    pub category: ExternalPackageRefCategory,
    /// Type name such as `purl` or `cpe23Type`
    pub reference_type: String,
    pub locator: String,
    pub comment: Option<String>,
}

impl ExternalPackageRef {
    pub fn new(
        category: ExternalPackageRefCategory,
        reference_type: impl Into<String>,
        locator: impl Into<String>,
    ) -> Self {
        Self {
            category,
            reference_type: reference_type.into(),
            locator: locator.into(),
            comment: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub spdx_id: String,
    pub name: String,
    pub download_location: ThreeValued<String>,
    pub version: Option<String>,
    pub file_name: Option<String>,
    pub supplier: Option<ThreeValued<Actor>>,
    pub originator: Option<ThreeValued<Actor>>,
    /// Whether the package's files were examined; `true` unless stated otherwise
    pub files_analyzed: bool,
    pub verification_code: Option<PackageVerificationCode>,
    pub checksums: Vec<Checksum>,
    pub homepage: Option<ThreeValued<String>>,
    pub source_info: Option<String>,
    pub license_concluded: Option<ThreeValued<LicenseExpression>>,
    pub license_info_from_files: Vec<ThreeValued<LicenseExpression>>,
    pub license_declared: Option<ThreeValued<LicenseExpression>>,
    pub license_comment: Option<String>,
    pub copyright_text: Option<ThreeValued<String>>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub comment: Option<String>,
    pub external_references: Vec<ExternalPackageRef>,
    pub attribution_texts: Vec<String>,
    pub primary_package_purpose: Option<PrimaryPackagePurpose>,
    pub release_date: Option<DateTime<Utc>>,
    pub built_date: Option<DateTime<Utc>>,
    pub valid_until_date: Option<DateTime<Utc>>,
}

impl Package {
    pub fn new(
        spdx_id: impl Into<String>,
        name: impl Into<String>,
        download_location: ThreeValued<String>,
    ) -> Self {
        Self {
            spdx_id: spdx_id.into(),
            name: name.into(),
            download_location,
            version: None,
            file_name: None,
            supplier: None,
            originator: None,
            files_analyzed: true,
            verification_code: None,
            checksums: Vec::new(),
            homepage: None,
            source_info: None,
            license_concluded: None,
            license_info_from_files: Vec::new(),
            license_declared: None,
            license_comment: None,
            copyright_text: None,
            summary: None,
            description: None,
            comment: None,
            external_references: Vec::new(),
            attribution_texts: Vec::new(),
            primary_package_purpose: None,
            release_date: None,
            built_date: None,
            valid_until_date: None,
        }
    }
}
