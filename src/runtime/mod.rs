//! Runtime module - executes commands against the surfaces
//!
//! - `app` - the explorer loop: dispatch, command execution, worker threads
//! - `highlight` - the single live editor mark

pub mod app;
pub mod highlight;

pub use app::Explorer;
pub use highlight::HighlightSlot;
