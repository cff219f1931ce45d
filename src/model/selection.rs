//! Selection bridge state
//!
//! Tracks the one active source highlight and the node last matched from
//! the editor cursor. The live editor mark itself is held by the runtime
//! (`runtime::HighlightSlot`); this is the model-side mirror of it.

use crate::syntax::SourceRange;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Source range currently highlighted from a tree pick
    pub active: Option<SourceRange>,
    /// Range of the tree node matched from the last cursor move
    pub cursor_node: Option<SourceRange>,
    /// Last reported cursor position
    pub cursor: Option<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active highlight, returning the one it displaced
    pub fn set_active(&mut self, range: SourceRange) -> Option<SourceRange> {
        self.active.replace(range)
    }

    pub fn clear_active(&mut self) -> Option<SourceRange> {
        self.active.take()
    }

    pub fn has_highlight(&self) -> bool {
        self.active.is_some()
    }
}
