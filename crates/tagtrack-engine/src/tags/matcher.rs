use serde::Serialize;

use crate::buffer::{Range, TextBuffer};

/// Upper bound on matches returned by one search, so a pathological
/// document cannot make a single search unbounded.
pub const DEFAULT_MAX_MATCHES: usize = 10_000;

/// A located literal substring, before expansion to a full tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagMatch {
    pub range: Range,
    pub text: String,
}

/// Finds every literal `<tag_name` in the buffer, in document order.
///
/// The search is case-sensitive and non-overlapping, and stops after
/// `max_matches` hits. Note that `<note` also matches `<notes`: the needle is
/// a prefix, not a name.
pub fn search_open_tag<B: TextBuffer>(
    buffer: &B,
    tag_name: &str,
    max_matches: usize,
) -> Vec<TagMatch> {
    let needle = format!("<{tag_name}");
    let mut matches = Vec::new();

    'lines: for (index, line) in buffer.lines().enumerate() {
        let line_no = index + 1;
        let mut from = 0;
        while let Some(found) = line[from..].find(&needle) {
            if matches.len() >= max_matches {
                tracing::debug!(max_matches, tag_name, "match limit reached");
                break 'lines;
            }
            let start = from + found;
            let end = start + needle.len();
            matches.push(TagMatch {
                range: Range::new(line_no, start + 1, line_no, end + 1),
                text: needle.clone(),
            });
            from = end;
        }
    }

    tracing::debug!(tag_name, count = matches.len(), "searched open tags");
    matches
}
