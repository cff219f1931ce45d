//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod editor;
mod errors;
mod language;
mod parse;
mod selection;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::SessionSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use editor::update_editor;
pub use errors::update_errors;
pub use language::update_language;
pub use parse::update_parse;
pub use selection::update_selection;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Editor(m) => editor::update_editor(model, m),
        Msg::Language(m) => language::update_language(model, m),
        Msg::Parse(m) => parse::update_parse(model, m),
        Msg::Selection(m) => selection::update_selection(model, m),
        Msg::Errors(m) => errors::update_errors(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after session state and logs diffs for debugging.
/// Cursor moves are noisy and only logged at trace level.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    use crate::messages::EditorMsg;

    let is_noisy = matches!(&msg, Msg::Editor(EditorMsg::CursorMoved(_)));

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = SessionSnapshot::from_model(model);

    if is_noisy {
        tracing::trace!(target: "message", msg = %msg_name, "processing");
    } else {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = SessionSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "session", %diff, "state changed");
    }

    result
}

/// Get a display name for a message type
///
/// Code and parse payloads are summarized rather than dumped.
/// Example outputs:
/// - `Editor::CursorMoved(15)`
/// - `Editor::CodeChanged(42 bytes)`
/// - `Parse::Completed(#3, ok)`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::{EditorMsg, ParseMsg};

    match msg {
        Msg::Editor(EditorMsg::CodeChanged(code)) => {
            format!("Editor::CodeChanged({} bytes)", code.len())
        }
        Msg::Editor(m) => format!("Editor::{:?}", m),
        Msg::Language(m) => format!("Language::{:?}", m),
        Msg::Parse(ParseMsg::Completed { request, result }) => format!(
            "Parse::Completed({}, {})",
            request,
            if result.is_ok() { "ok" } else { "err" }
        ),
        Msg::Parse(m) => format!("Parse::{:?}", m),
        Msg::Selection(m) => format!("Selection::{:?}", m),
        Msg::Errors(m) => format!("Errors::{:?}", m),
    }
}
