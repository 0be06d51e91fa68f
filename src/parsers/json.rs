use super::jsonlike::parse_document_value;
use super::traits::SpdxParser;
use crate::error::Result;
use crate::model::Document;
use serde_json::Value;

/// Parses an SPDX JSON document.
pub fn parse_json(input: &str) -> Result<Document> {
    let value: Value = serde_json::from_str(input)?;
    Ok(parse_document_value(&value)?)
}

/// Parses an SPDX JSON document from a reader.
pub fn parse_json_reader<R: std::io::Read>(reader: R) -> Result<Document> {
    let value: Value = serde_json::from_reader(reader)?;
    Ok(parse_document_value(&value)?)
}

/// [`SpdxParser`] for `.json` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonParser;

impl SpdxParser for JsonParser {
    fn parse_str(&self, content: &str) -> Result<Document> {
        parse_json(content)
    }

    fn format_name(&self) -> &'static str {
        "JSON"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParseErrorKind, SpdxError};

    #[test]
    fn test_syntax_errors_are_invalid_json() {
        match parse_json("{\"spdxVersion\": ") {
            Err(SpdxError::Parse {
                source: ParseErrorKind::InvalidJson(_),
                ..
            }) => {}
            other => panic!("expected invalid JSON, got {other:?}"),
        }
    }

    #[test]
    fn test_structural_errors_are_batched() {
        let err = parse_json("{}").unwrap_err();
        let messages = err.parsing_messages().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Error while parsing CreationInfo: ['spdxVersion is required"));
    }
}
