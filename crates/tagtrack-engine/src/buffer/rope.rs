use std::borrow::Cow;

use xi_rope::Rope;

use super::{BufferError, TextBuffer};

/// A [`TextBuffer`] backed by an `xi_rope::Rope`.
///
/// The line count is computed once on construction; the buffer is read-only
/// for the lifetime of a tagging session.
#[derive(Clone)]
pub struct RopeBuffer {
    rope: Rope,
    line_count: usize,
}

impl RopeBuffer {
    /// Decodes `bytes` as UTF-8 and loads them into a rope.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BufferError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from(text))
    }

    /// Full document text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}

impl From<&str> for RopeBuffer {
    fn from(text: &str) -> Self {
        let rope = Rope::from(text);
        let line_count = rope.lines(..).count();
        Self { rope, line_count }
    }
}

impl std::fmt::Debug for RopeBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RopeBuffer")
            .field("len_bytes", &self.rope.len())
            .field("line_count", &self.line_count)
            .finish()
    }
}

impl TextBuffer for RopeBuffer {
    fn line_count(&self) -> usize {
        self.line_count
    }

    fn line_content(&self, line: usize) -> Option<Cow<'_, str>> {
        if line == 0 || line > self.line_count {
            return None;
        }
        let start = self.rope.offset_of_line(line - 1);
        self.rope.lines(start..).next()
    }

    fn lines(&self) -> impl Iterator<Item = Cow<'_, str>> + '_ {
        self.rope.lines(..)
    }
}
