use std::collections::HashMap;

use crate::buffer::{Position, Range};

use super::{
    DecorationError, DecorationId, DecorationSpec, DecorationStyle, RenderSurface, StatusColor,
    SurfaceError,
};

/// Tracks which surface decoration covers which range.
///
/// Every id held here is attached on the surface exactly once. The registry
/// never talks to a surface on its own: each operation is handed the surface
/// it should update, so one registry belongs to one editing session.
#[derive(Debug, Default, Clone)]
pub struct DecorationRegistry {
    entries: HashMap<DecorationId, Range>,
}

impl DecorationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &DecorationId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn range_of(&self, id: &DecorationId) -> Option<Range> {
        self.entries.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DecorationId, &Range)> {
        self.entries.iter()
    }

    /// Id of the decoration under a caret, preferring the innermost range.
    pub fn id_at(&self, pos: Position) -> Option<&DecorationId> {
        self.entries
            .iter()
            .filter(|(_, range)| range.contains(pos))
            .max_by_key(|(_, range)| range.start())
            .map(|(id, _)| id)
    }

    /// Detaches everything this registry tracks and forgets it.
    ///
    /// The registry is empty afterwards even if the surface call fails.
    pub fn reset_all<S: RenderSurface>(&mut self, surface: &mut S) -> Result<(), DecorationError> {
        if self.entries.is_empty() {
            return Ok(());
        }
        let ids: Vec<DecorationId> = self.entries.drain().map(|(id, _)| id).collect();
        tracing::debug!(count = ids.len(), "resetting decorations");
        surface.apply_decorations(&ids, &[])?;
        Ok(())
    }

    /// Attaches one decoration per range and records the ids the surface
    /// hands back, `ids[i]` covering `ranges[i]`.
    ///
    /// The first range's line is revealed. Nothing already attached is rolled
    /// back on failure, except surplus ids with no range to pair with, which
    /// are detached before the mismatch is reported.
    pub fn add_batch<S: RenderSurface>(
        &mut self,
        ranges: &[Range],
        style: DecorationStyle,
        surface: &mut S,
    ) -> Result<Vec<DecorationId>, DecorationError> {
        let Some(first) = ranges.first() else {
            return Ok(Vec::new());
        };
        let specs: Vec<DecorationSpec> = ranges
            .iter()
            .map(|&range| DecorationSpec { range, style })
            .collect();

        let ids = surface.apply_decorations(&[], &specs)?;
        for (id, range) in ids.iter().zip(ranges) {
            self.entries.insert(id.clone(), *range);
        }
        if ids.len() > ranges.len() {
            // Surplus ids have no range to track, so the surface must not keep them.
            surface.apply_decorations(&ids[ranges.len()..], &[])?;
        }
        if ids.len() != ranges.len() {
            return Err(SurfaceError::IdCountMismatch {
                expected: ranges.len(),
                actual: ids.len(),
            }
            .into());
        }

        surface.reveal_line(first.start_line);
        tracing::debug!(count = ids.len(), style = style.class_name, "added decorations");
        Ok(ids)
    }

    /// Detaches one decoration. Returns false, and leaves the surface alone,
    /// if the id is not tracked here.
    pub fn remove_by_id<S: RenderSurface>(
        &mut self,
        id: &DecorationId,
        surface: &mut S,
    ) -> Result<bool, DecorationError> {
        if !self.entries.contains_key(id) {
            tracing::debug!(%id, "ignoring removal of unknown decoration");
            return Ok(false);
        }
        surface.apply_decorations(std::slice::from_ref(id), &[])?;
        self.entries.remove(id);
        Ok(true)
    }

    /// Redraws `range` in the style of `status`.
    ///
    /// A tracked `id` is swapped for the new decoration in a single surface
    /// update, so the decoration count never grows. Without a tracked id this
    /// is a one-range [`add_batch`](Self::add_batch).
    pub fn recolor<S: RenderSurface>(
        &mut self,
        id: Option<&DecorationId>,
        range: Range,
        status: StatusColor,
        surface: &mut S,
    ) -> Result<DecorationId, DecorationError> {
        let style = status.style();
        let Some(old) = id.filter(|id| self.entries.contains_key(*id)) else {
            let mut ids = self.add_batch(&[range], style, surface)?;
            return ids.pop().ok_or_else(|| {
                SurfaceError::IdCountMismatch {
                    expected: 1,
                    actual: 0,
                }
                .into()
            });
        };

        let spec = DecorationSpec { range, style };
        let ids = surface.apply_decorations(std::slice::from_ref(old), &[spec])?;
        self.entries.remove(old);
        let [new] = <[DecorationId; 1]>::try_from(ids).map_err(|ids| {
            SurfaceError::IdCountMismatch {
                expected: 1,
                actual: ids.len(),
            }
        })?;
        self.entries.insert(new.clone(), range);
        tracing::debug!(%old, %new, status = status.name(), "recolored decoration");
        Ok(new)
    }
}
