//! Parse session update handlers
//!
//! Handles the request lifecycle for the Elm architecture:
//!
//! ```text
//! ParseMsg::Start → Cmd::RunParse (+ Cmd::ScheduleParseTimeout)
//!                 → ParseMsg::Completed | ParseMsg::TimedOut → Cmd::Redraw
//! ```
//!
//! Every request carries a `RequestId`; only the in-flight id may resolve
//! the session.

use crate::commands::Cmd;
use crate::messages::ParseMsg;
use crate::model::{AppModel, ParseStatus, Resolved};
use crate::syntax::AUTO;

/// Handle parse-related messages
pub fn update_parse(model: &mut AppModel, msg: ParseMsg) -> Option<Cmd> {
    match msg {
        ParseMsg::Start => {
            let language = model.effective_language();
            let request = model.session.begin_request(language);

            if request.language == AUTO {
                tracing::warn!("Parse requested before any language was detected");
                model.session.complete(
                    request.id,
                    Err(vec!["no language detected; select a language".to_string()]),
                );
                return Some(Cmd::Redraw);
            }

            tracing::debug!(
                "update_parse: starting request {} ({}, {} bytes)",
                request.id,
                request.language,
                request.code.len()
            );

            let timeout = model
                .config
                .parse_timeout()
                .map(|delay_ms| Cmd::ScheduleParseTimeout {
                    request: request.id,
                    delay_ms,
                });

            Some(Cmd::batch(vec![
                Cmd::RunParse { request },
                Cmd::from(timeout),
                Cmd::Redraw,
            ]))
        }

        ParseMsg::Completed { request, result } => {
            match model.session.complete(request, result) {
                Resolved::Stale => {
                    tracing::debug!(
                        "Discarding stale parse result {} (in flight: {:?})",
                        request,
                        model.session.in_flight()
                    );
                    None
                }
                Resolved::Applied(ParseStatus::Succeeded) => {
                    // Node matched against the previous tree is meaningless now
                    model.selection.cursor_node = None;
                    tracing::debug!("Applied parse result {}", request);
                    Some(Cmd::Redraw)
                }
                Resolved::Applied(status) => {
                    tracing::debug!(
                        "Parse {} finished as {} with {} errors",
                        request,
                        status.label(),
                        model.session.errors.len()
                    );
                    Some(Cmd::Redraw)
                }
            }
        }

        ParseMsg::TimedOut { request } => {
            let after_ms = model.config.parse_timeout_ms;
            match model.session.time_out(request, after_ms) {
                Resolved::Stale => None,
                Resolved::Applied(_) => {
                    tracing::warn!("Parse request {} timed out after {}ms", request, after_ms);
                    Some(Cmd::Redraw)
                }
            }
        }
    }
}
