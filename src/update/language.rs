//! Language selection and detection handlers

use crate::commands::Cmd;
use crate::messages::LanguageMsg;
use crate::model::AppModel;

/// Handle language selection and detector reports
pub fn update_language(model: &mut AppModel, msg: LanguageMsg) -> Option<Cmd> {
    match msg {
        LanguageMsg::Select(selected) => {
            let normalized = model.registry.normalize_selection(&selected);
            if normalized != selected {
                tracing::debug!(
                    "Unknown language selection {:?}, treating as {}",
                    selected,
                    normalized
                );
            }
            model.session.selected_language = normalized.to_string();
        }
        LanguageMsg::Detected(detected) => {
            if !model.registry.is_concrete(&detected) {
                tracing::warn!(
                    "Ignoring detected language {:?}: not a registered language",
                    detected
                );
                return None;
            }
            model.session.detected_language = detected;
        }
    }

    Some(Cmd::batch(vec![
        Cmd::SetEditorMode {
            mode: model.edit_mode(),
        },
        Cmd::Redraw,
    ]))
}
