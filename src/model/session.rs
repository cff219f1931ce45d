//! Parse session state
//!
//! Owns the code text, the dirty flag, the request lifecycle and the last
//! successfully parsed tree. Only the most recently started request may
//! resolve the session; anything older is stale and dropped.

use serde::Serialize;

use super::errors::{ErrorLog, ErrorMessage};
use crate::syntax::{Ast, ParseResult, AUTO};

/// Lifecycle of the current parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl ParseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ParseStatus::Idle => "idle",
            ParseStatus::Loading => "loading",
            ParseStatus::Succeeded => "succeeded",
            ParseStatus::Failed => "failed",
        }
    }
}

/// Monotonically increasing parse request token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Parameters captured when a parse starts
///
/// Later edits never change what was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRequest {
    pub id: RequestId,
    pub language: String,
    pub code: String,
}

/// What happened to a resolution delivered to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    /// The resolution belonged to the in-flight request and was applied
    Applied(ParseStatus),
    /// Superseded, already resolved, or timed out: ignored
    Stale,
}

/// The single mutable session aggregate
#[derive(Debug, Clone)]
pub struct SessionState {
    /// User selection, `auto` or a registry id (normalized on write)
    pub selected_language: String,
    /// Language reported by the detector
    pub detected_language: String,
    pub source_code: String,
    /// Set on every edit; never cleared within a session
    pub dirty: bool,
    pub parse_status: ParseStatus,
    /// Last successful tree; kept across failed parses
    pub ast: Option<Ast>,
    pub errors: ErrorLog,
    /// Last issued request id
    last_request: u64,
    /// Request whose resolution is still awaited
    in_flight: Option<RequestId>,
}

impl SessionState {
    pub fn new(detected_language: impl Into<String>) -> Self {
        Self {
            selected_language: AUTO.to_string(),
            detected_language: detected_language.into(),
            source_code: String::new(),
            dirty: false,
            parse_status: ParseStatus::Idle,
            ast: None,
            errors: ErrorLog::new(),
            last_request: 0,
            in_flight: None,
        }
    }

    /// Replace the code text and mark the session dirty
    pub fn edit_code(&mut self, code: String) {
        self.source_code = code;
        self.dirty = true;
    }

    /// Start a new request for `language`, superseding any in-flight one
    pub fn begin_request(&mut self, language: String) -> ParseRequest {
        self.last_request += 1;
        let id = RequestId(self.last_request);

        if let Some(previous) = self.in_flight.replace(id) {
            tracing::debug!("Request {} supersedes in-flight {}", id, previous);
        }

        self.errors.clear();
        self.parse_status = ParseStatus::Loading;

        ParseRequest {
            id,
            language,
            code: self.source_code.clone(),
        }
    }

    /// The request whose resolution is awaited, if any
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        self.in_flight == Some(id)
    }

    pub fn is_loading(&self) -> bool {
        self.parse_status == ParseStatus::Loading
    }

    /// Apply a parse result if it belongs to the in-flight request
    ///
    /// A failure replaces the error log but keeps the previous tree.
    pub fn complete(&mut self, id: RequestId, result: ParseResult) -> Resolved {
        if !self.is_current(id) {
            return Resolved::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(ast) => {
                self.ast = Some(ast);
                self.parse_status = ParseStatus::Succeeded;
            }
            Err(items) => {
                self.errors.clear();
                self.errors.append(items);
                self.parse_status = ParseStatus::Failed;
            }
        }
        Resolved::Applied(self.parse_status)
    }

    /// Fail the in-flight request `id` with a timeout entry
    pub fn time_out(&mut self, id: RequestId, after_ms: u64) -> Resolved {
        if !self.is_current(id) {
            return Resolved::Stale;
        }
        self.in_flight = None;

        self.errors.clear();
        self.errors.push(ErrorMessage::timeout(format!(
            "parse request timed out after {}ms",
            after_ms
        )));
        self.parse_status = ParseStatus::Failed;
        Resolved::Applied(self.parse_status)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new("")
    }
}
