//! Suffix-based dispatch between the SPDX 2 serializations.
//!
//! `.rdf` and `.rdf.xml` must be checked before `.xml`.

use crate::error::{Result, SpdxError};
use crate::model::Document;
use crate::parsers::{JsonParser, RdfParser, SpdxParser, TagValueParser, XmlParser, YamlParser};
use crate::validation::validate_full_spdx_document;
use crate::writers::{JsonWriter, RdfWriter, SpdxWriter, TagValueWriter, XmlWriter, YamlWriter};
use std::path::Path;
use tracing::debug;

/// The serializations an SPDX 2 document can be read from and written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Json,
    Yaml,
    Xml,
    TagValue,
    RdfXml,
}

impl FileFormat {
    pub const ALL: [Self; 5] = [
        Self::Json,
        Self::Yaml,
        Self::Xml,
        Self::TagValue,
        Self::RdfXml,
    ];

    /// Infers the format from the file name; `None` for unknown suffixes.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".rdf") || name.ends_with(".rdf.xml") {
            Some(Self::RdfXml)
        } else if name.ends_with(".tag") || name.ends_with(".spdx") {
            Some(Self::TagValue)
        } else if name.ends_with(".json") {
            Some(Self::Json)
        } else if name.ends_with(".xml") {
            Some(Self::Xml)
        } else if name.ends_with(".yaml") || name.ends_with(".yml") {
            Some(Self::Yaml)
        } else {
            None
        }
    }

    /// Like [`Self::from_path`], but an unknown suffix is an error.
    pub fn detect(path: &Path) -> Result<Self> {
        Self::from_path(path).ok_or_else(|| {
            SpdxError::UnsupportedFormat(format!(
                "{}: expected one of .rdf, .rdf.xml, .tag, .spdx, .json, .xml, .yaml, .yml",
                path.display()
            ))
        })
    }

    pub fn name(&self) -> &'static str {
        self.parser().format_name()
    }

    pub fn parser(&self) -> &'static dyn SpdxParser {
        match self {
            Self::Json => &JsonParser,
            Self::Yaml => &YamlParser,
            Self::Xml => &XmlParser,
            Self::TagValue => &TagValueParser,
            Self::RdfXml => &RdfParser,
        }
    }

    pub fn writer(&self) -> &'static dyn SpdxWriter {
        match self {
            Self::Json => &JsonWriter,
            Self::Yaml => &YamlWriter,
            Self::Xml => &XmlWriter,
            Self::TagValue => &TagValueWriter,
            Self::RdfXml => &RdfWriter,
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses the SPDX 2 document at `path` with the codec its suffix selects.
pub fn parse_file(path: &Path) -> Result<Document> {
    let format = FileFormat::detect(path)?;
    debug!(path = %path.display(), format = %format, "parsing SPDX document");
    format.parser().parse(path)
}

/// Writes `document` to `path` with the codec its suffix selects.
///
/// With `validate` set the document is validated against its own version
/// first and every message is returned in one [`SpdxError::Validation`].
pub fn write_file(document: &Document, path: &Path, validate: bool) -> Result<()> {
    let format = FileFormat::detect(path)?;
    if validate {
        let messages = validate_full_spdx_document(document, None);
        if !messages.is_empty() {
            return Err(SpdxError::validation(
                messages.iter().map(ToString::to_string).collect(),
            ));
        }
    }
    debug!(path = %path.display(), format = %format, "writing SPDX document");
    format.writer().write(document, path)
}
