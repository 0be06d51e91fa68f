//! SPDX tag-value parser.
//!
//! The format is line-oriented `Tag: value`, with `<text>…</text>` blocks for
//! multi-line values. Package containment is implied by order: a file that
//! follows a package belongs to it.

mod lexer;
mod parser;

pub use lexer::{classify, tokenize, Token, ValueKind, RESERVED_TAGS};
pub use parser::{parse_tag_value, start_tag};

use super::traits::SpdxParser;
use crate::error::Result;
use crate::model::Document;

/// [`SpdxParser`] for `.spdx` and `.tag` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct TagValueParser;

impl SpdxParser for TagValueParser {
    fn parse_str(&self, content: &str) -> Result<Document> {
        Ok(parse_tag_value(content)?)
    }

    fn format_name(&self) -> &'static str {
        "tag-value"
    }
}
