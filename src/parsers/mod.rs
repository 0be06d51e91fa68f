//! SPDX 2 parsers.
//!
//! Every serialization reads into the same [`Document`](crate::model::Document):
//!
//! - **tag-value** (`.spdx`, `.tag`): line oriented, containment by order
//! - **JSON**, **YAML** and **XML**: one nested tree, parsed by `jsonlike`
//! - **RDF/XML** (`.rdf`, `.rdf.xml`): read into triples, then walked
//!
//! Problems are collected per element and raised together as one
//! [`SpdxParsingError`](crate::error::SpdxParsingError).
//!
//! ## Usage
//!
//! ```no_run
//! use spdx_tools::parsers::{JsonParser, SpdxParser};
//! use std::path::Path;
//!
//! let document = JsonParser.parse(Path::new("sbom.spdx.json")).unwrap();
//! println!("{} packages", document.packages.len());
//! ```

pub mod json;
mod jsonlike;
pub mod rdf;
pub mod tagvalue;
mod traits;
pub mod xml;
pub mod yaml;

pub use json::{parse_json, JsonParser};
pub use jsonlike::parse_document_value;
pub use rdf::{parse_rdf, RdfParser};
pub use tagvalue::{parse_tag_value, TagValueParser};
pub use traits::{SpdxParser, MAX_SPDX_FILE_SIZE, SUPPORTED_VERSIONS};
pub use xml::{parse_xml, XmlParser};
pub use yaml::{parse_yaml, YamlParser};
