//! SPDX 3 support: the element model, the SPDX 2 → 3 conversion and the
//! JSON-LD writer.

pub mod bump;
pub mod model;
pub mod writer;

pub use bump::{bump_document, bump_document_with, BumpOptions, BumpResult};
pub use model::{Element, Payload};
pub use writer::{write_payload_file, write_payload_json};
