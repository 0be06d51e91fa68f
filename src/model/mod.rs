//! The SPDX 2 in-memory data model.
//!
//! Entities own their children by value and refer to each other only through
//! `spdx_id` strings. Fields that may carry `NOASSERTION` or `NONE` use
//! [`ThreeValued`]; optional ones are `Option<ThreeValued<T>>` so an absent
//! field stays distinct from an explicit `NOASSERTION`.
//!
//! For repeated id lookups build a [`SpdxElementIndex`]:
//!
//! ```ignore
//! let document = spdx_tools::formats::parse_file(&path)?;
//! let index = SpdxElementIndex::build(&document);
//! ```

mod actor;
mod annotation;
mod checksum;
pub mod datetime;
mod document;
mod element;
mod enums;
mod extracted;
mod file;
mod index;
pub mod license;
mod package;
mod relationship;
mod snippet;
mod three_valued;
pub mod utils;
mod version;

pub use actor::*;
pub use annotation::*;
pub use checksum::*;
pub use document::*;
pub use element::*;
pub use enums::*;
pub use extracted::*;
pub use file::*;
pub use index::*;
pub use license::LicenseExpression;
pub use package::*;
pub use relationship::*;
pub use snippet::*;
pub use three_valued::*;
pub use version::*;
