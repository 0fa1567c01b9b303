//! One document being annotated, with its overlay.
//!
//! [`TaggingSession`] owns the buffer, the rendering surface and the
//! decoration registry for that document, and drives the tag pipeline:
//! search, expand, decorate, then recolor or reshape individual tags as the
//! user works through them. Operations run one at a time through `&mut self`.

use crate::buffer::{Position, Range, TextBuffer};
use crate::decorations::{
    DecorationError, DecorationId, DecorationRegistry, DecorationStyle, RenderSurface, StatusColor,
};
use crate::tags::{
    DEFAULT_MAX_MATCHES, TagChangeIntent, TagError, TagPayload, build_tag_payload,
    expand_tag_range, is_self_closing, locate_closing_tag, search_open_tag,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Tag(#[from] TagError),
    #[error(transparent)]
    Decoration(#[from] DecorationError),
    #[error("No marked tag at index {0}")]
    NoSuchMatch(usize),
}

/// A start tag that has been expanded and decorated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedTag {
    /// Decoration currently drawn over the tag.
    pub id: DecorationId,
    /// Span of the start tag, from `<` to one past `>`.
    pub range: Range,
}

#[derive(Debug)]
pub struct TaggingSession<B, S> {
    buffer: B,
    surface: S,
    registry: DecorationRegistry,
    tag_name: Option<String>,
    marked: Vec<MarkedTag>,
    max_matches: usize,
}

impl<B: TextBuffer, S: RenderSurface> TaggingSession<B, S> {
    pub fn new(buffer: B, surface: S) -> Self {
        Self {
            buffer,
            surface,
            registry: DecorationRegistry::new(),
            tag_name: None,
            marked: Vec::new(),
            max_matches: DEFAULT_MAX_MATCHES,
        }
    }

    pub fn with_max_matches(mut self, max_matches: usize) -> Self {
        self.max_matches = max_matches;
        self
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn registry(&self) -> &DecorationRegistry {
        &self.registry
    }

    /// Name passed to the last successful [`mark_tags`](Self::mark_tags).
    pub fn tag_name(&self) -> Option<&str> {
        self.tag_name.as_deref()
    }

    pub fn marked(&self) -> &[MarkedTag] {
        &self.marked
    }

    pub fn marked_tag(&self, index: usize) -> Result<&MarkedTag, SessionError> {
        self.marked.get(index).ok_or(SessionError::NoSuchMatch(index))
    }

    /// Index of the marked tag whose start tag covers `pos`.
    pub fn marked_index_at(&self, pos: Position) -> Option<usize> {
        let id = self.registry.id_at(pos)?;
        self.marked.iter().position(|tag| &tag.id == id)
    }

    /// Clears the overlay, then finds, expands and highlights every
    /// `<tag_name` in the document. Returns how many tags were marked.
    ///
    /// Every match is expanded before anything is drawn, so a malformed tag
    /// leaves the overlay empty rather than half built.
    pub fn mark_tags(&mut self, tag_name: &str) -> Result<usize, SessionError> {
        self.clear()?;

        let ranges = search_open_tag(&self.buffer, tag_name, self.max_matches)
            .into_iter()
            .map(|m| expand_tag_range(m.range, &self.buffer))
            .collect::<Result<Vec<_>, _>>()?;

        let ids = self
            .registry
            .add_batch(&ranges, DecorationStyle::MATCH, &mut self.surface)?;
        self.marked = ids
            .into_iter()
            .zip(ranges)
            .map(|(id, range)| MarkedTag { id, range })
            .collect();
        self.tag_name = Some(tag_name.to_string());

        tracing::info!(tag_name, count = self.marked.len(), "marked tags");
        Ok(self.marked.len())
    }

    /// Removes every decoration and forgets the marked tags.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.marked.clear();
        self.tag_name = None;
        self.registry.reset_all(&mut self.surface)?;
        Ok(())
    }

    /// Literal text of a marked start tag, across lines if it wraps.
    pub fn tag_text(&self, index: usize) -> Result<String, SessionError> {
        let tag = self.marked_tag(index)?;
        self.buffer
            .text_in_range(&tag.range)
            .ok_or(SessionError::Tag(TagError::MalformedTag {
                line: tag.range.start_line,
                column: tag.range.start_column,
            }))
    }

    /// Span of the whole element: the start tag alone when it closes itself,
    /// otherwise through the end of its closing tag.
    pub fn element_range(&self, index: usize) -> Result<Range, SessionError> {
        let range = self.marked_tag(index)?.range;
        if is_self_closing(&self.tag_text(index)?) {
            return Ok(range);
        }
        let tag_name = self.tag_name.as_deref().unwrap_or_default();
        let end = locate_closing_tag(tag_name, &range, &self.buffer)?;
        Ok(range.with_end(end))
    }

    /// Recolors one marked tag and returns its new decoration id.
    pub fn set_status(
        &mut self,
        index: usize,
        status: StatusColor,
    ) -> Result<DecorationId, SessionError> {
        let tag = self
            .marked
            .get_mut(index)
            .ok_or(SessionError::NoSuchMatch(index))?;
        let id = self
            .registry
            .recolor(Some(&tag.id), tag.range, status, &mut self.surface)?;
        tag.id = id.clone();
        Ok(id)
    }

    /// Takes one tag's highlight off the overlay. The tag stays in
    /// [`marked`](Self::marked) so indices remain stable.
    pub fn unmark(&mut self, index: usize) -> Result<bool, SessionError> {
        let id = self.marked_tag(index)?.id.clone();
        Ok(self.registry.remove_by_id(&id, &mut self.surface)?)
    }

    /// The tag's literal text reshaped per `intent`, ready to persist.
    pub fn payload(&self, index: usize, intent: TagChangeIntent) -> Result<TagPayload, SessionError> {
        Ok(build_tag_payload(&self.tag_text(index)?, intent))
    }
}
