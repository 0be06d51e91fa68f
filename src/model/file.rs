use super::{Checksum, ChecksumAlgorithm, FileType, LicenseExpression, ThreeValued};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// Relative path starting with `./`
    pub name: String,
    pub spdx_id: String,
    pub checksums: Vec<Checksum>,
    pub file_types: Vec<FileType>,
    pub license_concluded: Option<ThreeValued<LicenseExpression>>,
    pub license_info_in_file: Vec<ThreeValued<LicenseExpression>>,
    pub license_comment: Option<String>,
    pub copyright_text: Option<ThreeValued<String>>,
    pub comment: Option<String>,
    pub notice: Option<String>,
    pub contributors: Vec<String>,
    pub attribution_texts: Vec<String>,
}

impl File {
    pub fn new(name: impl Into<String>, spdx_id: impl Into<String>, checksums: Vec<Checksum>) -> Self {
        Self {
            name: name.into(),
            spdx_id: spdx_id.into(),
            checksums,
            file_types: Vec::new(),
            license_concluded: None,
            license_info_in_file: Vec::new(),
            license_comment: None,
            copyright_text: None,
            comment: None,
            notice: None,
            contributors: Vec::new(),
            attribution_texts: Vec::new(),
        }
    }

    /// The SHA1 value, which every valid file carries.
    #[must_use]
    pub fn sha1(&self) -> Option<&str> {
        self.checksums
            .iter()
            .find(|c| c.algorithm == ChecksumAlgorithm::Sha1)
            .map(|c| c.value.as_str())
    }
}
