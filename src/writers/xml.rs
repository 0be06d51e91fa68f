//! SPDX XML writer. Lists become repeated elements named after their key.

use super::jsonlike::document_to_value;
use crate::error::{Result, SpdxError};
use crate::model::Document;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::Value;

/// Name of the root element.
pub const XML_ROOT: &str = "Document";

/// Writes `document` as SPDX XML.
pub fn write_xml(document: &Document) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(serialization)?;
    write_element(&mut writer, XML_ROOT, &document_to_value(document))?;
    String::from_utf8(writer.into_inner()).map_err(serialization)
}

fn serialization(err: impl std::fmt::Display) -> SpdxError {
    SpdxError::Serialization(format!("XML: {err}"))
}

fn write_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> Result<()> {
    match value {
        Value::Array(items) => {
            for item in items {
                write_element(writer, name, item)?;
            }
        }
        Value::Object(map) => {
            writer
                .write_event(Event::Start(BytesStart::new(name)))
                .map_err(serialization)?;
            for (key, child) in map {
                write_element(writer, key, child)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(serialization)?;
        }
        Value::Null => {}
        scalar => {
            let text = match scalar {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            writer
                .write_event(Event::Start(BytesStart::new(name)))
                .map_err(serialization)?;
            writer
                .write_event(Event::Text(BytesText::new(&text)))
                .map_err(serialization)?;
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(serialization)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::datetime::parse_datetime;
    use crate::model::{Actor, CreationInfo, Package, Relationship, RelationshipType, ThreeValued};
    use crate::parsers::xml::parse_xml;

    #[test]
    fn test_round_trip() {
        let mut document = Document::new(CreationInfo::new(
            "SPDX-2.3",
            "SPDXRef-DOCUMENT",
            "Doc",
            "https://x/y",
            vec![Actor::tool("LF-1.0").unwrap()],
            parse_datetime("2022-12-01T00:00:00Z").unwrap(),
        ));
        let mut package = Package::new("SPDXRef-P", "a < b", ThreeValued::None);
        package.files_analyzed = false;
        package.attribution_texts.push("one".to_string());
        document.packages.push(package);
        document.relationships.push(Relationship::new(
            "SPDXRef-DOCUMENT",
            RelationshipType::Describes,
            ThreeValued::Value("SPDXRef-P".to_string()),
        ));

        let written = write_xml(&document).unwrap();
        assert!(written.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(written.contains("<name>a &lt; b</name>"));
        assert!(written.contains("<filesAnalyzed>false</filesAnalyzed>"));
        assert_eq!(parse_xml(&written).unwrap(), document);
    }
}
