//! Effective-language resolution
//!
//! The effective language is derived on every observation and never stored:
//! a user selection overrides the detected language unless it is `auto`.

use super::languages::{LanguageRegistry, AUTO, PLAIN_TEXT_MODE};

/// Result of resolving the user's selection against the detector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Language actually used for parsing and mode selection (never `auto`
    /// when `detected` is a concrete language)
    pub effective_language: String,
    /// Editor mode for the effective language
    pub edit_mode: String,
}

/// Resolve `selected` (possibly `auto`) against `detected`
///
/// A selection missing from the registry is treated as `auto`. `detected`
/// should be a registry language; when it is not, the detected id still
/// wins but the mode falls back to plain text.
pub fn resolve(selected: &str, detected: &str, registry: &LanguageRegistry) -> Resolution {
    let selected = registry.normalize_selection(selected);

    let effective = if selected == AUTO { detected } else { selected };

    let edit_mode = match registry.edit_mode(effective) {
        Some(mode) => mode,
        None => {
            tracing::warn!(
                "No edit mode for language {:?}, falling back to {}",
                effective,
                PLAIN_TEXT_MODE
            );
            PLAIN_TEXT_MODE
        }
    };

    Resolution {
        effective_language: effective.to_string(),
        edit_mode: edit_mode.to_string(),
    }
}
