//! Single-slot holder for the editor's live highlight mark

use crate::surface::{MarkHandle, SourceSurface};
use crate::syntax::SourceRange;

/// Owns at most one live mark at a time
#[derive(Debug)]
pub struct HighlightSlot<M: MarkHandle> {
    current: Option<(SourceRange, M)>,
}

impl<M: MarkHandle> Default for HighlightSlot<M> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<M: MarkHandle> HighlightSlot<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the existing mark, then mark `range` on `surface`
    pub fn replace<S>(&mut self, surface: &mut S, range: SourceRange)
    where
        S: SourceSurface<Mark = M>,
    {
        self.clear();
        let mark = surface.select_range(range);
        self.current = Some((range, mark));
    }

    /// Clear the live mark, returning the range it covered
    pub fn clear(&mut self) -> Option<SourceRange> {
        let (range, mut mark) = self.current.take()?;
        mark.clear();
        Some(range)
    }

    pub fn range(&self) -> Option<SourceRange> {
        self.current.as_ref().map(|(range, _)| *range)
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}
