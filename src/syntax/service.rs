//! Parse service boundary
//!
//! The session never parses anything itself; it hands the effective
//! language and a snapshot of the code to a `ParseService` running on a
//! worker thread and waits for the result to come back as a message.

use std::sync::Arc;

use super::ast::Ast;

/// Outcome of a parse call: a tree, or an ordered list of failure messages
pub type ParseResult = Result<Ast, Vec<String>>;

/// Anything that can turn `(language, code)` into a syntax tree
///
/// Implementations may block; callers run them off the event loop.
/// `language` is always a concrete id, never `auto`.
pub trait ParseService: Send + Sync {
    fn parse(&self, language: &str, code: &str) -> ParseResult;
}

impl<T: ParseService + ?Sized> ParseService for Arc<T> {
    fn parse(&self, language: &str, code: &str) -> ParseResult {
        (**self).parse(language, code)
    }
}

impl<T: ParseService + ?Sized> ParseService for Box<T> {
    fn parse(&self, language: &str, code: &str) -> ParseResult {
        (**self).parse(language, code)
    }
}
