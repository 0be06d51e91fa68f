use super::ThreeValued;
use serde::{Deserialize, Serialize};

/// License text found in the analyzed software that is not on the SPDX list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedLicensingInfo {
    /// `LicenseRef-…`
    pub license_id: Option<String>,
    pub extracted_text: Option<String>,
    pub license_name: Option<ThreeValued<String>>,
    pub comment: Option<String>,
    /// URLs where the license text was seen
    pub cross_references: Vec<String>,
}
