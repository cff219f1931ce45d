//! Explorer configuration persistence
//!
//! Stores user preferences in `~/.config/astscope/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default parse timeout in milliseconds
pub const DEFAULT_PARSE_TIMEOUT_MS: u64 = 10_000;

/// Explorer configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Parse requests unresolved after this long fail with a timeout (0 disables)
    #[serde(default = "default_parse_timeout_ms")]
    pub parse_timeout_ms: u64,
    /// Language selected at startup (`auto` to follow the detector)
    #[serde(default = "default_language")]
    pub default_language: String,
    /// Detected language used when nothing better is known
    #[serde(default = "default_fallback_language")]
    pub fallback_language: String,
    /// Optional YAML language registry replacing the built-in table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<PathBuf>,
}

fn default_parse_timeout_ms() -> u64 {
    DEFAULT_PARSE_TIMEOUT_MS
}

fn default_language() -> String {
    crate::syntax::AUTO.to_string()
}

fn default_fallback_language() -> String {
    "python".to_string()
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            parse_timeout_ms: default_parse_timeout_ms(),
            default_language: default_language(),
            fallback_language: default_fallback_language(),
            registry: None,
        }
    }
}

impl ExplorerConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        Self::load_from(&path)
    }

    /// Load config from a specific file, or return defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Parse timeout, `None` when disabled
    pub fn parse_timeout(&self) -> Option<u64> {
        (self.parse_timeout_ms > 0).then_some(self.parse_timeout_ms)
    }
}
