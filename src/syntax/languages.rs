//! Language registry
//!
//! Maps language ids to display names and editor modes. The registry is
//! loaded once at startup (built-in table or a YAML file) and always carries
//! the synthetic `auto` entry.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reserved id meaning "use whatever the detector reports"
pub const AUTO: &str = "auto";

/// Display name of the synthetic `auto` entry
pub const AUTO_DISPLAY_NAME: &str = "(auto)";

/// Editor mode used when a language has no usable mode
pub const PLAIN_TEXT_MODE: &str = "text";

/// Built-in languages: (id, display name, editor mode, extensions)
const BUILTIN: &[(&str, &str, &str, &[&str])] = &[
    ("bash", "Bash", "shell", &["sh", "bash", "zsh"]),
    ("c", "C", "text/x-csrc", &["c", "h"]),
    ("cpp", "C++", "text/x-c++src", &["cpp", "cc", "cxx", "hpp", "hxx", "hh"]),
    ("css", "CSS", "css", &["css"]),
    ("go", "Go", "go", &["go"]),
    ("html", "HTML", "htmlmixed", &["html", "htm"]),
    ("java", "Java", "text/x-java", &["java"]),
    ("javascript", "JavaScript", "javascript", &["js", "mjs", "cjs", "jsx"]),
    ("json", "JSON", "application/json", &["json"]),
    ("php", "PHP", "php", &["php"]),
    ("python", "Python", "python", &["py", "pyw", "pyi"]),
    ("rust", "Rust", "rust", &["rs"]),
    ("toml", "TOML", "toml", &["toml"]),
    ("tsx", "TSX", "text/typescript-jsx", &["tsx"]),
    ("typescript", "TypeScript", "text/typescript", &["ts", "mts", "cts"]),
];

/// Errors raised while building a registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("language id `auto` is reserved")]
    ReservedId,

    #[error("language id must not be empty")]
    EmptyId,

    #[error("language `{0}` has no edit mode")]
    MissingMode(String),

    #[error("failed to read registry {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse registry: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// One selectable language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageEntry {
    pub id: String,
    pub display_name: String,
    /// `None` only for the synthetic `auto` entry
    pub edit_mode: Option<String>,
    pub extensions: Vec<String>,
}

/// On-disk shape of a registry entry: `{name, mode, extensions}`
#[derive(Debug, Deserialize)]
struct RegistryFileEntry {
    name: String,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    extensions: Vec<String>,
}

/// Immutable id -> language table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRegistry {
    entries: BTreeMap<String, LanguageEntry>,
}

impl LanguageRegistry {
    /// The languages the in-process parser understands
    pub fn builtin() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(AUTO.to_string(), auto_entry());
        for (id, name, mode, exts) in BUILTIN {
            entries.insert(
                id.to_string(),
                LanguageEntry {
                    id: id.to_string(),
                    display_name: name.to_string(),
                    edit_mode: Some(mode.to_string()),
                    extensions: exts.iter().map(|e| e.to_string()).collect(),
                },
            );
        }
        Self { entries }
    }

    /// Build a registry from `(id, display name, edit mode)` triples
    pub fn from_entries<I, S>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (S, S, S)>,
        S: Into<String>,
    {
        let mut map = BTreeMap::new();
        map.insert(AUTO.to_string(), auto_entry());
        for (id, name, mode) in entries {
            let entry = validate_entry(id.into(), name.into(), Some(mode.into()), Vec::new())?;
            map.insert(entry.id.clone(), entry);
        }
        Ok(Self { entries: map })
    }

    /// Parse a YAML registry: a mapping of id -> `{name, mode, extensions}`
    pub fn from_yaml_str(content: &str) -> Result<Self, RegistryError> {
        let raw: BTreeMap<String, RegistryFileEntry> = serde_yaml::from_str(content)?;

        let mut entries = BTreeMap::new();
        entries.insert(AUTO.to_string(), auto_entry());
        for (id, raw) in raw {
            let entry = validate_entry(id, raw.name, raw.mode, raw.extensions)?;
            entries.insert(entry.id.clone(), entry);
        }
        Ok(Self { entries })
    }

    /// Load a YAML registry file
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_yaml_str(&content)?;
        tracing::info!(
            "Loaded {} languages from {}",
            registry.len() - 1,
            path.display()
        );
        Ok(registry)
    }

    /// Whether `id` is a key, `auto` included
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Whether `id` names a real language (not `auto`)
    pub fn is_concrete(&self, id: &str) -> bool {
        id != AUTO && self.contains(id)
    }

    pub fn get(&self, id: &str) -> Option<&LanguageEntry> {
        self.entries.get(id)
    }

    pub fn edit_mode(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(|e| e.edit_mode.as_deref())
    }

    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.get(id).map(|e| e.display_name.as_str())
    }

    /// Coerce a user selection: unknown ids become `auto`
    pub fn normalize_selection<'a>(&self, selected: &'a str) -> &'a str {
        if self.contains(selected) {
            selected
        } else {
            AUTO
        }
    }

    /// Number of entries including `auto`
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in id order, `auto` included
    pub fn iter(&self) -> impl Iterator<Item = &LanguageEntry> {
        self.entries.values()
    }

    /// Detect a language from a file extension
    pub fn detect_from_extension(&self, ext: &str) -> Option<&str> {
        let ext = ext.to_lowercase();
        self.entries
            .values()
            .find(|e| e.extensions.iter().any(|x| *x == ext))
            .map(|e| e.id.as_str())
    }

    /// Detect a language from a file path
    pub fn detect_from_path(&self, path: &Path) -> Option<&str> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.detect_from_extension(ext))
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn auto_entry() -> LanguageEntry {
    LanguageEntry {
        id: AUTO.to_string(),
        display_name: AUTO_DISPLAY_NAME.to_string(),
        edit_mode: None,
        extensions: Vec::new(),
    }
}

fn validate_entry(
    id: String,
    display_name: String,
    edit_mode: Option<String>,
    extensions: Vec<String>,
) -> Result<LanguageEntry, RegistryError> {
    if id.is_empty() {
        return Err(RegistryError::EmptyId);
    }
    if id == AUTO {
        return Err(RegistryError::ReservedId);
    }
    let edit_mode = match edit_mode {
        Some(mode) if !mode.trim().is_empty() => mode,
        _ => return Err(RegistryError::MissingMode(id)),
    };
    Ok(LanguageEntry {
        id,
        display_name,
        edit_mode: Some(edit_mode),
        extensions: extensions.into_iter().map(|e| e.to_lowercase()).collect(),
    })
}
