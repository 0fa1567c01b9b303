//! Line-indexed read access to the document being annotated.
//!
//! Everything downstream (tag search, range expansion, closing tag lookup)
//! reads the document through [`TextBuffer`], addressing lines 1-based.

pub mod position;
pub mod rope;

use std::borrow::Cow;

pub use position::{Position, Range};
pub use rope::RopeBuffer;

#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Read access to a document, one line at a time.
///
/// Line content never includes the line terminator.
pub trait TextBuffer {
    /// Number of lines in the document.
    fn line_count(&self) -> usize;

    /// Content of the 1-based `line`, or `None` if it is out of range.
    fn line_content(&self, line: usize) -> Option<Cow<'_, str>>;

    /// Iterates every line in document order.
    fn lines(&self) -> impl Iterator<Item = Cow<'_, str>> + '_ {
        (1..=self.line_count()).filter_map(move |line| self.line_content(line))
    }

    /// All lines as owned strings.
    fn all_lines(&self) -> Vec<String> {
        self.lines().map(Cow::into_owned).collect()
    }

    /// The literal text covered by `range`, lines joined with `\n`.
    ///
    /// Returns `None` if the range reaches outside the buffer or splits a
    /// UTF-8 character.
    fn text_in_range(&self, range: &Range) -> Option<String> {
        let mut out = String::new();
        for line_no in range.start_line..=range.end_line {
            let line = self.line_content(line_no)?;
            let from = if line_no == range.start_line {
                range.start_column.checked_sub(1)?
            } else {
                0
            };
            let to = if line_no == range.end_line {
                range.end_column.checked_sub(1)?
            } else {
                line.len()
            };
            if line_no > range.start_line {
                out.push('\n');
            }
            out.push_str(line.get(from..to)?);
        }
        Some(out)
    }
}

impl TextBuffer for Vec<String> {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_content(&self, line: usize) -> Option<Cow<'_, str>> {
        let index = line.checked_sub(1)?;
        self.get(index).map(|l| Cow::Borrowed(l.as_str()))
    }
}
