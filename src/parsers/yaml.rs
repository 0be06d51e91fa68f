use super::jsonlike::parse_document_value;
use super::traits::SpdxParser;
use crate::error::Result;
use crate::model::Document;
use serde_json::Value;

/// Parses an SPDX YAML document. YAML scalars deserialize into the same
/// tree JSON produces.
pub fn parse_yaml(input: &str) -> Result<Document> {
    let value: Value = serde_yaml::from_str(input)?;
    Ok(parse_document_value(&value)?)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct YamlParser;

impl SpdxParser for YamlParser {
    fn parse_str(&self, content: &str) -> Result<Document> {
        parse_yaml(content)
    }

    fn format_name(&self) -> &'static str {
        "YAML"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_document() {
        let input = r#"
spdxVersion: SPDX-2.3
SPDXID: SPDXRef-DOCUMENT
name: Doc
dataLicense: CC0-1.0
documentNamespace: https://x/y
creationInfo:
  creators:
    - "Tool: LF-1.0"
  created: "2022-12-01T00:00:00Z"
packages:
  - SPDXID: SPDXRef-P
    name: p
    downloadLocation: NOASSERTION
    filesAnalyzed: false
"#;
        let doc = parse_yaml(input).unwrap();
        assert_eq!(doc.packages.len(), 1);
        assert!(!doc.packages[0].files_analyzed);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(parse_yaml("key: [unterminated").is_err());
    }
}
