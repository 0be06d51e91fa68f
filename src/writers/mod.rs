//! SPDX 2 serializers.
//!
//! Each serialization exposes a `write_*` function returning the rendered
//! text, plus a unit struct implementing [`SpdxWriter`] for dispatch by
//! [`crate::formats::FileFormat`]. JSON, YAML and XML share the document
//! tree built by `jsonlike`.

pub mod json;
mod jsonlike;
pub mod rdf;
pub mod tagvalue;
pub mod xml;
pub mod yaml;

pub use json::write_json;
pub use jsonlike::document_to_value;
pub use rdf::write_rdf;
pub use tagvalue::write_tag_value;
pub use xml::write_xml;
pub use yaml::write_yaml;

use crate::error::{Result, SpdxError};
use crate::model::Document;
use std::path::Path;

/// A serializer for one SPDX 2 format.
pub trait SpdxWriter {
    /// Render the document as text
    fn write_str(&self, document: &Document) -> Result<String>;

    /// Get format name
    fn format_name(&self) -> &'static str;

    /// Render the document and write it to `path`, replacing any existing file.
    fn write(&self, document: &Document, path: &Path) -> Result<()> {
        let rendered = self.write_str(document)?;
        std::fs::write(path, rendered).map_err(|e| SpdxError::io(path, e))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonWriter;

impl SpdxWriter for JsonWriter {
    fn write_str(&self, document: &Document) -> Result<String> {
        write_json(document)
    }

    fn format_name(&self) -> &'static str {
        "JSON"
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct YamlWriter;

impl SpdxWriter for YamlWriter {
    fn write_str(&self, document: &Document) -> Result<String> {
        write_yaml(document)
    }

    fn format_name(&self) -> &'static str {
        "YAML"
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct XmlWriter;

impl SpdxWriter for XmlWriter {
    fn write_str(&self, document: &Document) -> Result<String> {
        write_xml(document)
    }

    fn format_name(&self) -> &'static str {
        "XML"
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TagValueWriter;

impl SpdxWriter for TagValueWriter {
    fn write_str(&self, document: &Document) -> Result<String> {
        Ok(write_tag_value(document))
    }

    fn format_name(&self) -> &'static str {
        "tag-value"
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RdfWriter;

impl SpdxWriter for RdfWriter {
    fn write_str(&self, document: &Document) -> Result<String> {
        write_rdf(document)
    }

    fn format_name(&self) -> &'static str {
        "RDF/XML"
    }
}
