use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DecorationError;

/// Class names and minimap color for one kind of highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecorationStyle {
    pub class_name: &'static str,
    pub glyph_margin_class: &'static str,
    pub color: &'static str,
}

impl DecorationStyle {
    /// Freshly marked tags.
    pub const MATCH: Self = Self {
        class_name: "decorationContent",
        glyph_margin_class: "decorationGlyphMargin",
        color: "#FFFF00",
    };
    pub const DONE: Self = Self {
        class_name: "decorationContentDone",
        glyph_margin_class: "decorationGlyphMarginDone",
        color: "#90EE90",
    };
    pub const CURRENT: Self = Self {
        class_name: "decorationContentCurrent",
        glyph_margin_class: "decorationGlyphMarginCurrent",
        color: "#bbfaf9",
    };
}

/// Review state of a tag, shown by recoloring its decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusColor {
    Done = 0,
    Current = 1,
}

impl StatusColor {
    pub const ALL: [StatusColor; 2] = [StatusColor::Done, StatusColor::Current];

    pub const fn style(self) -> DecorationStyle {
        match self {
            StatusColor::Done => DecorationStyle::DONE,
            StatusColor::Current => DecorationStyle::CURRENT,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            StatusColor::Done => "done",
            StatusColor::Current => "current",
        }
    }
}

impl FromStr for StatusColor {
    type Err = DecorationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusColor::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DecorationError::InvalidStatusColor(s.to_string()))
    }
}

impl TryFrom<u8> for StatusColor {
    type Error = DecorationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(StatusColor::Done),
            1 => Ok(StatusColor::Current),
            other => Err(DecorationError::InvalidStatusColor(other.to_string())),
        }
    }
}
