use crate::buffer::{Position, Range, TextBuffer};

use super::TagError;

/// True if the tag literal closes itself (`<pb n="2"/>`).
pub fn is_self_closing(tag_literal: &str) -> bool {
    tag_literal.contains("/>")
}

/// Finds the end of the `</tag_name>` that closes the start tag at
/// `open_tag_range`.
///
/// Only meaningful for start tags that are not self-closing. The scan begins
/// right after the start tag and takes the first literal `</tag_name>`, so
/// nested elements of the same name resolve to the innermost closing tag.
/// The returned position is one past the closing `>`.
pub fn locate_closing_tag<B: TextBuffer>(
    tag_name: &str,
    open_tag_range: &Range,
    buffer: &B,
) -> Result<Position, TagError> {
    let closing = format!("</{tag_name}>");
    let first_line = open_tag_range.end_line;

    for line_no in first_line..=buffer.line_count() {
        let Some(line) = buffer.line_content(line_no) else {
            break;
        };
        let from = if line_no == first_line {
            open_tag_range.end_column.saturating_sub(1)
        } else {
            0
        };
        if let Some(found) = line.get(from..).and_then(|rest| rest.find(&closing)) {
            let index = from + found;
            return Ok(Position::new(line_no, index + closing.len() + 1));
        }
    }

    tracing::warn!(tag_name, line = first_line, "closing tag not found");
    Err(TagError::UnmatchedClosingTag {
        tag_name: tag_name.to_string(),
        line: first_line,
    })
}
