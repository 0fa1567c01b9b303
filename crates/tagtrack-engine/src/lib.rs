pub mod buffer;
pub mod decorations;
pub mod io;
pub mod session;
pub mod tags;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use buffer::{BufferError, Position, Range, RopeBuffer, TextBuffer};
pub use decorations::{
    DecorationError, DecorationId, DecorationRegistry, DecorationSpec, DecorationStyle,
    InMemorySurface, RenderSurface, StatusColor, SurfaceError,
};
pub use session::{MarkedTag, SessionError, TaggingSession};
pub use tags::*;
