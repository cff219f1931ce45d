//! Editor and tree surface contracts
//!
//! The session never renders anything. It drives an editor surface and a
//! tree surface through these traits, and the surfaces report user activity
//! back as messages (`EditorMsg`, `SelectionMsg`).
//!
//! Headless implementations are provided for the CLI and tests.

pub mod buffer;
pub mod tree_view;

pub use buffer::{BufferMark, BufferSurface};
pub use tree_view::TreeView;

use crate::syntax::SourceRange;

/// A live mark created by `SourceSurface::select_range`
pub trait MarkHandle {
    /// Remove the mark from the editor; clearing twice is harmless
    fn clear(&mut self);
}

/// The text-editing surface
pub trait SourceSurface {
    type Mark: MarkHandle;

    /// Switch the language mode used for editing
    fn set_mode(&mut self, mode: &str);

    /// Visually mark `range` and return a handle that can clear it
    fn select_range(&mut self, range: SourceRange) -> Self::Mark;

    /// Current code text
    fn code(&self) -> String;
}

/// The tree-rendering surface
pub trait TreeSurface {
    /// Select the node enclosing a source position
    fn select_node(&mut self, position: usize);
}
