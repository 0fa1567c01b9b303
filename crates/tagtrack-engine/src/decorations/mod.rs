//! Highlight overlays for located tags.
//!
//! The rendering surface owns the visible decorations and hands out their
//! ids; [`DecorationRegistry`] remembers which id covers which range so the
//! overlay can be recolored, removed, or wiped without asking the surface.

pub mod registry;
pub mod style;
pub mod surface;

use serde::{Deserialize, Serialize};

use crate::buffer::Range;

pub use registry::DecorationRegistry;
pub use style::{DecorationStyle, StatusColor};
pub use surface::{InMemorySurface, RenderSurface};

/// Opaque decoration identifier assigned by the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DecorationId(pub String);

impl DecorationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DecorationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DecorationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// What the surface is asked to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecorationSpec {
    pub range: Range,
    pub style: DecorationStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("Rendering surface rejected the update: {0}")]
    Rejected(String),
    #[error("Rendering surface returned {actual} ids for {expected} decorations")]
    IdCountMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecorationError {
    #[error("Invalid status color: {0}")]
    InvalidStatusColor(String),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
