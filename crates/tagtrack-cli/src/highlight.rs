use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use tagtrack_engine::{DecorationSpec, DecorationStyle};

/// Terminal color for a decoration's minimap color (`#RRGGBB`).
pub fn color_of(style: &DecorationStyle) -> Color {
    parse_hex(style.color).unwrap_or(Color::Yellow)
}

fn parse_hex(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Byte spans of `line` covered by `specs`, clipped to the line and sorted.
pub fn segments(
    line_no: usize,
    line: &str,
    specs: &[&DecorationSpec],
) -> Vec<(usize, usize, DecorationStyle)> {
    let mut segs: Vec<_> = specs
        .iter()
        .filter_map(|spec| {
            let range = spec.range;
            let from = if range.start_line == line_no {
                range.start_column.saturating_sub(1)
            } else {
                0
            };
            let to = if range.end_line == line_no {
                range.end_column.saturating_sub(1)
            } else {
                line.len()
            };
            let (from, to) = (from.min(line.len()), to.min(line.len()));
            (from < to && line.is_char_boundary(from) && line.is_char_boundary(to))
                .then_some((from, to, spec.style))
        })
        .collect();
    segs.sort_by_key(|&(from, to, _)| (from, to));
    segs
}

pub fn highlight_line(line_no: usize, line: &str, specs: &[&DecorationSpec]) -> Line<'static> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    for (from, to, style) in segments(line_no, line, specs) {
        // overlapping decoration, first one drawn wins
        if from < cursor {
            continue;
        }
        if from > cursor {
            spans.push(Span::raw(line[cursor..from].to_string()));
        }
        spans.push(Span::styled(
            line[from..to].to_string(),
            Style::default().bg(color_of(&style)).fg(Color::Black),
        ));
        cursor = to;
    }
    if cursor < line.len() {
        spans.push(Span::raw(line[cursor..].to_string()));
    }
    Line::from(spans)
}
