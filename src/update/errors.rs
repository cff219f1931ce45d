//! Error log handlers

use crate::commands::Cmd;
use crate::messages::ErrorsMsg;
use crate::model::AppModel;

/// Handle dismissal of error entries
pub fn update_errors(model: &mut AppModel, msg: ErrorsMsg) -> Option<Cmd> {
    match msg {
        ErrorsMsg::Dismiss(index) => {
            let removed = model.session.errors.remove(index)?;
            tracing::debug!("Dismissed error {}: {}", index, removed.text);
            Some(Cmd::Redraw)
        }
        ErrorsMsg::DismissAll => {
            if model.session.errors.is_empty() {
                return None;
            }
            model.session.errors.clear();
            Some(Cmd::Redraw)
        }
    }
}
