use serde::{Deserialize, Serialize};

/// A caret location in the buffer.
///
/// Both fields are 1-based. Columns count UTF-8 bytes within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A span of buffer text, `[start, end)` in 1-based line/column coordinates.
///
/// The end column is one past the last included character, which is also
/// where a caret lands when placed right after the span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl Range {
    pub const fn new(
        start_line: usize,
        start_column: usize,
        end_line: usize,
        end_column: usize,
    ) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    pub fn start(&self) -> Position {
        Position::new(self.start_line, self.start_column)
    }

    pub fn end(&self) -> Position {
        Position::new(self.end_line, self.end_column)
    }

    #[must_use]
    pub fn is_multi_line(&self) -> bool {
        self.end_line > self.start_line
    }

    /// Returns true if `pos` falls inside `[start, end)`.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.start() <= pos && pos < self.end()
    }

    /// Returns a copy of this range ending at `end`.
    pub fn with_end(self, end: Position) -> Self {
        Self {
            end_line: end.line,
            end_column: end.column,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_order_by_line_then_column() {
        assert!(Position::new(1, 9) < Position::new(2, 1));
        assert!(Position::new(3, 2) < Position::new(3, 5));
    }

    #[test]
    fn test_contains_excludes_end() {
        let range = Range::new(1, 3, 1, 8);
        assert!(range.contains(Position::new(1, 3)));
        assert!(range.contains(Position::new(1, 7)));
        assert!(!range.contains(Position::new(1, 8)));
        assert!(!range.contains(Position::new(1, 2)));
    }

    #[test]
    fn test_contains_spans_lines() {
        let range = Range::new(2, 10, 4, 3);
        assert!(range.is_multi_line());
        assert!(range.contains(Position::new(3, 1)));
        assert!(range.contains(Position::new(2, 40)));
        assert!(!range.contains(Position::new(4, 3)));
    }

    #[test]
    fn test_with_end_keeps_start() {
        let range = Range::new(1, 1, 1, 6).with_end(Position::new(3, 9));
        assert_eq!(range, Range::new(1, 1, 3, 9));
    }
}
