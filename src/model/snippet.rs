use super::{LicenseExpression, ThreeValued};
use serde::{Deserialize, Serialize};

/// A `(start, end)` pair of 1-based, inclusive positions.
pub type Range = (u64, u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub spdx_id: String,
    /// Id of the file the snippet was taken from
    pub file_spdx_id: String,
    pub byte_range: Range,
    pub line_range: Option<Range>,
    pub license_concluded: Option<ThreeValued<LicenseExpression>>,
    pub license_info_in_snippet: Vec<ThreeValued<LicenseExpression>>,
    pub license_comment: Option<String>,
    pub copyright_text: Option<ThreeValued<String>>,
    pub comment: Option<String>,
    pub name: Option<String>,
    pub attribution_texts: Vec<String>,
}

impl Snippet {
    pub fn new(spdx_id: impl Into<String>, file_spdx_id: impl Into<String>, byte_range: Range) -> Self {
        Self {
            spdx_id: spdx_id.into(),
            file_spdx_id: file_spdx_id.into(),
            byte_range,
            line_range: None,
            license_concluded: None,
            license_info_in_snippet: Vec::new(),
            license_comment: None,
            copyright_text: None,
            comment: None,
            name: None,
            attribution_texts: Vec::new(),
        }
    }
}

/// Parses `start:end` as written by tag-value.
pub fn parse_range(raw: &str) -> Result<Range, String> {
    let invalid = || format!("Value for range does not match the form start:end, but is: {raw}");
    let (start, end) = raw.trim().split_once(':').ok_or_else(invalid)?;
    let start = start.trim().parse::<u64>().map_err(|_| invalid())?;
    let end = end.trim().parse::<u64>().map_err(|_| invalid())?;
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("310:420"), Ok((310, 420)));
        assert_eq!(parse_range(" 5 : 5 "), Ok((5, 5)));
        assert!(parse_range("5").is_err());
        assert!(parse_range("-1:4").is_err());
        assert!(parse_range("a:b").is_err());
    }
}
