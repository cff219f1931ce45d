//! Editor surface event handlers

use crate::commands::Cmd;
use crate::messages::EditorMsg;
use crate::model::AppModel;

use super::selection::select_node_at_cursor;

/// Handle events emitted by the editor surface
pub fn update_editor(model: &mut AppModel, msg: EditorMsg) -> Option<Cmd> {
    match msg {
        EditorMsg::CodeChanged(code) => {
            // Parsing is user-triggered; an edit only records the new text
            model.session.edit_code(code);
            Some(Cmd::Redraw)
        }
        EditorMsg::CursorMoved(position) => select_node_at_cursor(model, position),
    }
}
