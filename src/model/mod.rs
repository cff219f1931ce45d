//! Application model - the complete state of the explorer
//!
//! This module contains all the state types following the Elm Architecture
//! pattern. `AppModel` is owned by the runtime and mutated only by
//! `update::update`.

pub mod errors;
pub mod selection;
pub mod session;

pub use errors::{ErrorKind, ErrorLog, ErrorMessage};
pub use selection::SelectionState;
pub use session::{ParseRequest, ParseStatus, RequestId, Resolved, SessionState};

use crate::config::ExplorerConfig;
use crate::syntax::{resolve, LanguageRegistry, Resolution};

/// The complete application model
#[derive(Debug, Clone)]
pub struct AppModel {
    /// Static language table (includes `auto`)
    pub registry: LanguageRegistry,
    /// Parse session: code, status, tree, errors
    pub session: SessionState,
    /// Active highlight and cursor-matched node
    pub selection: SelectionState,
    /// Loaded configuration
    pub config: ExplorerConfig,
}

impl AppModel {
    /// Create a model; `detected_language` seeds the detector's report
    ///
    /// An unknown detected language falls back to `config.fallback_language`.
    pub fn new(
        registry: LanguageRegistry,
        config: ExplorerConfig,
        detected_language: impl Into<String>,
    ) -> Self {
        let mut detected = detected_language.into();
        if !registry.is_concrete(&detected) {
            tracing::warn!(
                "Detected language {:?} is not registered, using {:?}",
                detected,
                config.fallback_language
            );
            detected = config.fallback_language.clone();
        }

        let mut session = SessionState::new(detected);
        session.selected_language = registry
            .normalize_selection(&config.default_language)
            .to_string();

        Self {
            registry,
            session,
            selection: SelectionState::new(),
            config,
        }
    }

    /// Effective language and editor mode, recomputed on every call
    pub fn resolution(&self) -> Resolution {
        resolve(
            &self.session.selected_language,
            &self.session.detected_language,
            &self.registry,
        )
    }

    pub fn effective_language(&self) -> String {
        self.resolution().effective_language
    }

    pub fn edit_mode(&self) -> String {
        self.resolution().edit_mode
    }
}
