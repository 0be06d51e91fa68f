//! SPDX XML: the JSON tree with elements for keys.
//!
//! Leaf elements become strings, elements with children become mappings and
//! keys that are lists on the wire are always collected into arrays, even
//! with a single entry. The root element (`Document`) is the document
//! mapping itself.

use super::jsonlike::parse_document_value;
use super::traits::SpdxParser;
use crate::error::{ParseErrorKind, Result, SpdxError};
use crate::model::Document;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{Map, Value};

/// Keys whose values are lists in the JSON shape.
pub const LIST_LIKE_FIELDS: &[&str] = &[
    "creators",
    "externalDocumentRefs",
    "hasExtractedLicensingInfos",
    "seeAlsos",
    "annotations",
    "relationships",
    "snippets",
    "reviewers",
    "fileTypes",
    "files",
    "fileContributors",
    "licenseInfoInFiles",
    "artifactOf",
    "fileDependencies",
    "checksums",
    "attributionTexts",
    "packages",
    "licenseInfoFromFiles",
    "hasFiles",
    "externalRefs",
    "packageVerificationCodeExcludedFiles",
    "licenseInfoInSnippets",
    "ranges",
    "documentDescribes",
];

/// Parses an SPDX XML document.
pub fn parse_xml(input: &str) -> Result<Document> {
    let value = xml_to_value(input)?;
    Ok(parse_document_value(&value)?)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct XmlParser;

impl SpdxParser for XmlParser {
    fn parse_str(&self, content: &str) -> Result<Document> {
        parse_xml(content)
    }

    fn format_name(&self) -> &'static str {
        "XML"
    }
}

#[derive(Debug)]
struct Node {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Node {
    fn new(name: &[u8]) -> Self {
        Self {
            name: String::from_utf8_lossy(name).into_owned(),
            children: Map::new(),
            text: String::new(),
        }
    }

    fn into_value(self) -> Value {
        if self.children.is_empty() {
            Value::String(self.text)
        } else {
            Value::Object(self.children)
        }
    }
}

fn invalid(message: impl Into<String>) -> SpdxError {
    SpdxError::parse("XML deserialization", ParseErrorKind::InvalidXml(message.into()))
}

/// Reads XML into the intermediate tree.
pub fn xml_to_value(input: &str) -> Result<Value> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<Node> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => stack.push(Node::new(e.local_name().as_ref())),
            Ok(Event::Empty(e)) => {
                attach(&mut stack, &mut root, Node::new(e.local_name().as_ref()))?;
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|err| invalid(err.to_string()))?;
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::End(_)) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| invalid("closing tag without an opening tag"))?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(invalid(format!(
                    "error at position {}: {e}",
                    reader.buffer_position()
                )))
            }
        }
    }

    if !stack.is_empty() {
        return Err(invalid("unexpected end of input"));
    }
    root.ok_or_else(|| invalid("no root element"))
}

fn attach(stack: &mut [Node], root: &mut Option<Value>, node: Node) -> Result<()> {
    let Some(parent) = stack.last_mut() else {
        if root.is_some() {
            return Err(invalid("more than one root element"));
        }
        *root = Some(node.into_value());
        return Ok(());
    };
    let name = node.name.clone();
    let value = node.into_value();
    match parent.children.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None if LIST_LIKE_FIELDS.contains(&name.as_str()) => {
            parent.children.insert(name, Value::Array(vec![value]));
        }
        None => {
            parent.children.insert(name, value);
        }
    }
    Ok(())
}
