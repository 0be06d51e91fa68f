//! Simple licensing profile.

use super::common::ElementInfo;
use serde::Serialize;

/// A license expression kept as its SPDX string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseExpression {
    #[serde(flatten)]
    pub element: ElementInfo,
    #[serde(rename = "simplelicensing_licenseExpression")]
    pub license_expression: String,
    #[serde(
        rename = "simplelicensing_licenseListVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub license_list_version: Option<String>,
}

/// The text of a license that is not on the SPDX license list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimpleLicensingText {
    #[serde(flatten)]
    pub element: ElementInfo,
    #[serde(rename = "simplelicensing_licenseText")]
    pub license_text: String,
}
