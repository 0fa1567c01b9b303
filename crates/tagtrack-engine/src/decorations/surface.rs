use std::collections::HashMap;

use uuid::Uuid;

use super::{DecorationId, DecorationSpec, SurfaceError};

/// The thing that actually draws decorations (an editor widget, a terminal
/// view, or nothing at all in tests).
pub trait RenderSurface {
    /// Detaches `remove`, attaches `add`, and returns the ids of the newly
    /// attached decorations in the same order as `add`.
    ///
    /// Unknown ids in `remove` are ignored.
    fn apply_decorations(
        &mut self,
        remove: &[DecorationId],
        add: &[DecorationSpec],
    ) -> Result<Vec<DecorationId>, SurfaceError>;

    /// Scrolls so that `line` sits in the middle of the viewport.
    fn reveal_line(&mut self, _line: usize) {}
}

/// Headless surface that keeps attached decorations in memory.
#[derive(Debug, Default)]
pub struct InMemorySurface {
    decorations: HashMap<DecorationId, DecorationSpec>,
    revealed_line: Option<usize>,
}

impl InMemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.decorations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decorations.is_empty()
    }

    pub fn get(&self, id: &DecorationId) -> Option<&DecorationSpec> {
        self.decorations.get(id)
    }

    /// Line most recently passed to [`RenderSurface::reveal_line`].
    pub fn revealed_line(&self) -> Option<usize> {
        self.revealed_line
    }

    /// Attached decorations ordered by where they start in the document.
    pub fn decorations(&self) -> Vec<(&DecorationId, &DecorationSpec)> {
        let mut all: Vec<_> = self.decorations.iter().collect();
        all.sort_by_key(|(_, spec)| (spec.range.start(), spec.range.end()));
        all
    }

    /// Decorations that cover any part of the 1-based `line`.
    pub fn decorations_on_line(&self, line: usize) -> Vec<&DecorationSpec> {
        self.decorations()
            .into_iter()
            .map(|(_, spec)| spec)
            .filter(|spec| spec.range.start_line <= line && line <= spec.range.end_line)
            .collect()
    }
}

impl RenderSurface for InMemorySurface {
    fn apply_decorations(
        &mut self,
        remove: &[DecorationId],
        add: &[DecorationSpec],
    ) -> Result<Vec<DecorationId>, SurfaceError> {
        for id in remove {
            self.decorations.remove(id);
        }
        let ids = add
            .iter()
            .map(|spec| {
                let id = DecorationId(Uuid::new_v4().to_string());
                self.decorations.insert(id.clone(), *spec);
                id
            })
            .collect();
        Ok(ids)
    }

    fn reveal_line(&mut self, line: usize) {
        self.revealed_line = Some(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Range;
    use crate::decorations::DecorationStyle;

    fn spec(line: usize) -> DecorationSpec {
        DecorationSpec {
            range: Range::new(line, 1, line, 5),
            style: DecorationStyle::MATCH,
        }
    }

    #[test]
    fn test_assigns_one_unique_id_per_spec() {
        let mut surface = InMemorySurface::new();
        let ids = surface
            .apply_decorations(&[], &[spec(1), spec(2), spec(3)])
            .unwrap();
        assert_eq!(ids.len(), 3);
        assert_ne!(ids[0], ids[1]);
        assert_eq!(surface.get(&ids[2]).unwrap().range.start_line, 3);
    }

    #[test]
    fn test_removes_and_adds_in_one_call() {
        let mut surface = InMemorySurface::new();
        let ids = surface.apply_decorations(&[], &[spec(1), spec(2)]).unwrap();
        let new = surface.apply_decorations(&ids[..1], &[spec(7)]).unwrap();
        assert_eq!(surface.len(), 2);
        assert!(surface.get(&ids[0]).is_none());
        assert!(surface.get(&new[0]).is_some());
    }

    #[test]
    fn test_ignores_unknown_ids() {
        let mut surface = InMemorySurface::new();
        surface.apply_decorations(&[], &[spec(1)]).unwrap();
        surface
            .apply_decorations(&[DecorationId::from("nope")], &[])
            .unwrap();
        assert_eq!(surface.len(), 1);
    }

    #[test]
    fn test_lists_decorations_in_document_order() {
        let mut surface = InMemorySurface::new();
        surface
            .apply_decorations(&[], &[spec(9), spec(2), spec(5)])
            .unwrap();
        let lines: Vec<_> = surface
            .decorations()
            .into_iter()
            .map(|(_, s)| s.range.start_line)
            .collect();
        assert_eq!(lines, vec![2, 5, 9]);
        assert_eq!(surface.decorations_on_line(5).len(), 1);
        assert!(surface.decorations_on_line(4).is_empty());
    }
}
