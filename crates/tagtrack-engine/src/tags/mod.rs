//! Literal tag scanning over a [`TextBuffer`](crate::buffer::TextBuffer).
//!
//! None of this is an XML parser. Tags are found by plain substring search,
//! the same way an editor's find box would find them:
//!
//! - [`matcher`]: occurrences of `<name`
//! - [`expand`]: grow an occurrence to the `>` that ends the start tag
//! - [`closing`]: find the `</name>` that ends the element
//! - [`payload`]: reshape a tag literal (open ↔ self-closing) as a JSON record

pub mod closing;
pub mod expand;
pub mod matcher;
pub mod payload;

pub use closing::{is_self_closing, locate_closing_tag};
pub use expand::expand_tag_range;
pub use matcher::{DEFAULT_MAX_MATCHES, TagMatch, search_open_tag};
pub use payload::{TagChangeIntent, TagPayload, build_tag_payload};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    #[error("Tag starting at line {line}, column {column} is never closed with '>'")]
    MalformedTag { line: usize, column: usize },
    #[error("No closing </{tag_name}> found after line {line}")]
    UnmatchedClosingTag { tag_name: String, line: usize },
}
