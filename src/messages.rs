//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types. Surfaces and the
//! parse worker never touch the model directly; they send one of these.

use crate::model::RequestId;
use crate::syntax::ParseResult;

/// Events emitted by the editor surface
#[derive(Debug, Clone)]
pub enum EditorMsg {
    /// The code text changed (full new contents)
    CodeChanged(String),
    /// The cursor moved to a byte offset
    CursorMoved(usize),
}

/// Language selection and detection
#[derive(Debug, Clone)]
pub enum LanguageMsg {
    /// User picked a language (possibly `auto`, possibly garbage)
    Select(String),
    /// The detector reported the actual language
    Detected(String),
}

/// Parse request lifecycle
#[derive(Debug, Clone)]
pub enum ParseMsg {
    /// User asked for a parse of the current code
    Start,
    /// Worker finished a request
    Completed {
        request: RequestId,
        result: ParseResult,
    },
    /// Timeout timer fired for a request
    TimedOut { request: RequestId },
}

/// Events emitted by the tree surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMsg {
    /// A tree node was picked; highlight its source range
    NodeSelected { from: usize, to: usize },
    /// The tree selection was cleared
    Deselected,
}

/// Error log interactions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorsMsg {
    /// Dismiss the entry at this index
    Dismiss(usize),
    /// Dismiss every entry
    DismissAll,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Editor(EditorMsg),
    Language(LanguageMsg),
    Parse(ParseMsg),
    Selection(SelectionMsg),
    Errors(ErrorsMsg),
}

impl From<EditorMsg> for Msg {
    fn from(msg: EditorMsg) -> Self {
        Msg::Editor(msg)
    }
}

impl From<LanguageMsg> for Msg {
    fn from(msg: LanguageMsg) -> Self {
        Msg::Language(msg)
    }
}

impl From<ParseMsg> for Msg {
    fn from(msg: ParseMsg) -> Self {
        Msg::Parse(msg)
    }
}

impl From<SelectionMsg> for Msg {
    fn from(msg: SelectionMsg) -> Self {
        Msg::Selection(msg)
    }
}

impl From<ErrorsMsg> for Msg {
    fn from(msg: ErrorsMsg) -> Self {
        Msg::Errors(msg)
    }
}
