use crate::buffer::{Range, TextBuffer};

use super::TagError;

/// Grows a raw `<name` match to the full start tag, up to and including the
/// first `>` after it.
///
/// Attribute lists may wrap, so if the match's line has no `>` after the
/// match the scan continues at the start of each following line. The
/// returned end column sits one past the `>`.
///
/// The first `>` wins even when it sits inside a quoted attribute value
/// (`<ref target="a>b">`); such tags come back truncated.
pub fn expand_tag_range<B: TextBuffer>(match_range: Range, buffer: &B) -> Result<Range, TagError> {
    let malformed = || TagError::MalformedTag {
        line: match_range.start_line,
        column: match_range.start_column,
    };

    let mut line_no = match_range.end_line;
    let mut from = match_range.end_column.saturating_sub(1);

    while line_no <= buffer.line_count() {
        let line = buffer.line_content(line_no).ok_or_else(malformed)?;
        if let Some(found) = line.get(from..).and_then(|rest| rest.find('>')) {
            let expanded = Range {
                end_line: line_no,
                end_column: from + found + 2,
                ..match_range
            };
            tracing::trace!(?match_range, ?expanded, "expanded tag range");
            return Ok(expanded);
        }
        line_no += 1;
        from = 0;
    }

    tracing::warn!(
        line = match_range.start_line,
        column = match_range.start_column,
        "tag has no closing '>' before end of buffer"
    );
    Err(malformed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::RopeBuffer;
    use crate::tags::{DEFAULT_MAX_MATCHES, search_open_tag};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn expand_first(text: &str, tag: &str) -> Result<Range, TagError> {
        let buffer = RopeBuffer::from(text);
        let m = search_open_tag(&buffer, tag, DEFAULT_MAX_MATCHES).remove(0);
        expand_tag_range(m.range, &buffer)
    }

    #[rstest]
    #[case(r#"<tag attr="x">"#, 13)]
    #[case(r#"   <tag attr="x">body</tag>"#, 16)]
    #[case("<tag>", 4)]
    #[case("<tag/>", 5)]
    fn test_single_line_end_is_bracket_index_plus_two(#[case] text: &str, #[case] bracket: usize) {
        let range = expand_first(text, "tag").unwrap();
        assert_eq!(text.as_bytes()[bracket], b'>');
        assert_eq!(range.end_line, 1);
        assert_eq!(range.end_column, bracket + 2);
    }

    #[test]
    fn test_keeps_match_start() {
        let range = expand_first("x <pb n=\"3\"/>", "pb").unwrap();
        assert_eq!(range, Range::new(1, 3, 1, 14));
    }

    #[test]
    fn test_continues_onto_next_line() {
        let range = expand_first("<note\n  type=\"editorial\">text</note>", "note").unwrap();
        assert_eq!(range, Range::new(1, 1, 2, 20));
    }

    #[test]
    fn test_continues_across_several_lines() {
        let text = "<persName\n  ref=\"#a\"\n  type=\"x\"\n  >Ann</persName>";
        let range = expand_first(text, "persName").unwrap();
        assert_eq!(range.end_line, 4);
        assert_eq!(range.end_column, 4);
    }

    #[test]
    fn test_only_scans_after_the_match_on_its_line() {
        let range = expand_first("<a>x</a> <b\n>", "b").unwrap();
        assert_eq!(range, Range::new(1, 10, 2, 2));
    }

    #[test]
    fn test_unterminated_tag_is_malformed() {
        let err = expand_first("<p>\n<note type=\"a\"\n", "note").unwrap_err();
        assert_eq!(err, TagError::MalformedTag { line: 2, column: 1 });
    }

    #[test]
    fn test_first_bracket_wins_inside_quotes() {
        let range = expand_first(r#"<ref target="a>b">"#, "ref").unwrap();
        assert_eq!(range.end_column, 16);
    }
}
