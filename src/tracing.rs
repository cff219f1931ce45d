//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! parse lifecycle and selection transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=session=debug,message=trace` - scoped filtering
//! - `RUST_LOG=astscope::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/astscope/logs/astscope.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{AppModel, ParseStatus, RequestId};
use crate::syntax::SourceRange;

/// Initialize tracing subscriber with console and file logging
///
/// Console output goes to stderr so it never mixes with tree output, and
/// respects RUST_LOG (default `warn`).
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of session state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub effective_language: String,
    pub dirty: bool,
    pub status: ParseStatus,
    pub in_flight: Option<RequestId>,
    pub has_ast: bool,
    pub error_count: usize,
    pub highlight: Option<SourceRange>,
}

impl SessionSnapshot {
    pub fn from_model(model: &AppModel) -> Self {
        Self {
            effective_language: model.effective_language(),
            dirty: model.session.dirty,
            status: model.session.parse_status,
            in_flight: model.session.in_flight(),
            has_ast: model.session.ast.is_some(),
            error_count: model.session.errors.len(),
            highlight: model.selection.active,
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &SessionSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.effective_language != other.effective_language {
            changes.push(format!(
                "language: {} → {}",
                self.effective_language, other.effective_language
            ));
        }
        if self.dirty != other.dirty {
            changes.push(format!("dirty: {} → {}", self.dirty, other.dirty));
        }
        if self.status != other.status {
            changes.push(format!(
                "status: {} → {}",
                self.status.label(),
                other.status.label()
            ));
        }
        if self.in_flight != other.in_flight {
            changes.push(format!(
                "in flight: {:?} → {:?}",
                self.in_flight.map(|r| r.0),
                other.in_flight.map(|r| r.0)
            ));
        }
        if self.has_ast != other.has_ast {
            changes.push(format!("ast: {} → {}", self.has_ast, other.has_ast));
        }
        if self.error_count != other.error_count {
            changes.push(format!(
                "errors: {} → {}",
                self.error_count, other.error_count
            ));
        }
        if self.highlight != other.highlight {
            let fmt = |r: Option<SourceRange>| r.map_or("none".to_string(), |r| r.to_string());
            changes.push(format!(
                "highlight: {} → {}",
                fmt(self.highlight),
                fmt(other.highlight)
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
