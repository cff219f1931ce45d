//! Selection bridge handlers
//!
//! Two symmetric flows, both with a single active highlight:
//! - editor cursor → innermost tree node → `Cmd::SelectTreeNode`
//! - tree node pick → source range → `Cmd::HighlightSource`

use crate::commands::Cmd;
use crate::messages::SelectionMsg;
use crate::model::AppModel;
use crate::syntax::SourceRange;

/// Handle events emitted by the tree surface
pub fn update_selection(model: &mut AppModel, msg: SelectionMsg) -> Option<Cmd> {
    match msg {
        SelectionMsg::NodeSelected { from, to } => {
            let range = SourceRange::new(from, to);
            let previous = model.selection.set_active(range);
            tracing::debug!("Highlight {} (replacing {:?})", range, previous);
            Some(Cmd::HighlightSource { range })
        }
        SelectionMsg::Deselected => {
            if let Some(previous) = model.selection.clear_active() {
                tracing::debug!("Highlight {} cleared", previous);
            }
            Some(Cmd::ClearHighlight)
        }
    }
}

/// Map an editor cursor position to the innermost tree node
///
/// No-op until a parse has succeeded.
pub(super) fn select_node_at_cursor(model: &mut AppModel, position: usize) -> Option<Cmd> {
    model.selection.cursor = Some(position);

    let ast = model.session.ast.as_ref()?;
    let node = ast.node_at(position);
    model.selection.cursor_node = node.map(|n| n.range);

    match node {
        Some(node) => {
            tracing::trace!("Cursor {} is in {} {}", position, node.kind, node.range);
            Some(Cmd::SelectTreeNode { position })
        }
        None => None,
    }
}
