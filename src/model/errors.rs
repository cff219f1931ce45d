//! Error log - ordered, individually dismissible parse failures

use serde::Serialize;

/// What produced an error entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Reported by the parse service
    Service,
    /// The request did not resolve within the configured timeout
    Timeout,
}

/// A single entry in the error log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    pub text: String,
    pub kind: ErrorKind,
}

impl ErrorMessage {
    pub fn service(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ErrorKind::Service,
        }
    }

    pub fn timeout(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ErrorKind::Timeout,
        }
    }
}

/// Ordered collection of reported parse failures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorLog {
    entries: Vec<ErrorMessage>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append each service failure item, preserving arrival order
    pub fn append<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .extend(items.into_iter().map(ErrorMessage::service));
    }

    pub fn push(&mut self, message: ErrorMessage) {
        self.entries.push(message);
    }

    /// Remove exactly the entry at `index`; later entries shift down
    ///
    /// Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<ErrorMessage> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ErrorMessage> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ErrorMessage> {
        self.entries.iter()
    }

    /// Entry texts in order
    pub fn texts(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.text.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a ErrorLog {
    type Item = &'a ErrorMessage;
    type IntoIter = std::slice::Iter<'a, ErrorMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
