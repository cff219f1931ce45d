//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update:
//! talking to the editor and tree surfaces, or running work off the event
//! loop. The runtime executes them; `update` only returns them.

use crate::model::{ParseRequest, RequestId};
use crate::syntax::SourceRange;

/// Side effect requested by an update
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// State observed by views changed (status, tree, errors)
    Redraw,
    /// Execute multiple commands, in order
    Batch(Vec<Cmd>),

    // === Surface Commands ===
    /// Switch the editor's language mode
    SetEditorMode { mode: String },
    /// Ask the tree surface to select the node at a source position
    SelectTreeNode { position: usize },
    /// Clear the current editor mark, then mark `range`
    HighlightSource { range: SourceRange },
    /// Clear the current editor mark without creating a new one
    ClearHighlight,

    // === Parse Commands ===
    /// Run a parse request on a worker thread
    /// Sends Msg::Parse(Completed) when done
    RunParse { request: ParseRequest },
    /// Start a timer for a request
    /// After delay_ms, sends Msg::Parse(TimedOut)
    ScheduleParseTimeout { request: RequestId, delay_ms: u64 },
}

impl Cmd {
    /// Create a batch of commands, dropping no-ops and unwrapping singletons
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            // Surfaces repaint themselves when told to change
            Cmd::SetEditorMode { .. } => false,
            Cmd::SelectTreeNode { .. } => false,
            Cmd::HighlightSource { .. } => false,
            Cmd::ClearHighlight => false,
            // Loading indicator must appear as soon as a parse starts
            Cmd::RunParse { .. } => true,
            Cmd::ScheduleParseTimeout { .. } => false,
        }
    }

    /// Flatten nested batches into a list of leaf commands
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            cmd => vec![cmd],
        }
    }
}

// Allow converting Option<Cmd> to Cmd
impl From<Option<Cmd>> for Cmd {
    fn from(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}
