//! **Read, write, validate and convert SPDX documents.**
//!
//! `spdx-tools` works with SPDX 2.2 and 2.3 documents in every standard
//! serialization and upgrades them to SPDX 3.
//!
//! ## Key Features
//!
//! - **Five serializations**: tag-value, JSON, YAML, XML and RDF/XML, read
//!   and written through one in-memory [`model::Document`].
//! - **Validation**: checks a document against the rules of its SPDX
//!   version, including id uniqueness and cross references.
//! - **License expressions**: parsed into a tree, with listed license and
//!   exception ids checked against the SPDX license list.
//! - **SPDX 3**: converts an SPDX 2 document into a flat SPDX 3 element
//!   graph and writes it as JSON-LD.
//!
//! ## Modules
//!
//! - **[`model`]**: the SPDX 2 document model and its value types.
//! - **[`parsers`]** / **[`writers`]**: one codec per serialization.
//! - **[`formats`]**: picks the codec from a file suffix.
//! - **[`validation`]**: document and element validation.
//! - **[`spdx3`]**: the SPDX 3 model and the SPDX 2 → 3 conversion.
//! - **[`config`]** / **[`cli`]**: configuration and command handlers for
//!   the binaries.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use spdx_tools::{parse_file, validate_full_spdx_document};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let document = parse_file(Path::new("path/to/sbom.spdx"))?;
//!     for message in validate_full_spdx_document(&document, None) {
//!         println!("{message}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Converting to SPDX 3
//!
//! ```no_run
//! use std::path::Path;
//! use spdx_tools::{parse_file, spdx3};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let document = parse_file(Path::new("path/to/sbom.spdx.json"))?;
//!     let result = spdx3::bump_document(&document);
//!     println!("{}", spdx3::write_payload_json(&result.payload)?);
//!     Ok(())
//! }
//! ```

#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc, clippy::similar_names)]

pub mod cli;
pub mod config;
pub mod error;
pub mod formats;
pub mod logger;
pub mod model;
pub mod parsers;
pub mod spdx3;
pub mod validation;
pub mod writers;

pub use config::{ConfigError, ToolConfig, Validatable};
pub use error::{ErrorContext, Result, SpdxError, SpdxParsingError};
pub use formats::{parse_file, write_file, FileFormat};
pub use model::Document;
pub use parsers::SpdxParser;
pub use validation::{validate_full_spdx_document, ValidationMessage};
pub use writers::SpdxWriter;
