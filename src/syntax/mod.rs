//! Syntax module
//!
//! Everything the session needs to know about languages and trees:
//! - Language registry and effective-language resolution
//! - The syntax tree shape and position lookups
//! - The parse service boundary and a tree-sitter backed implementation
//!
//! ## Architecture
//!
//! ```text
//! ParseMsg::Start → Cmd::RunParse → (worker thread: ParseService::parse)
//!                 → ParseMsg::Completed → Cmd::Redraw
//! ```

mod ast;
mod languages;
mod parser;
mod resolver;
mod service;

pub use ast::{Ast, AstNode, SourceRange, Walk};
pub use languages::{
    LanguageEntry, LanguageRegistry, RegistryError, AUTO, AUTO_DISPLAY_NAME, PLAIN_TEXT_MODE,
};
pub use parser::{TreeSitterService, MAX_TREE_DEPTH};
pub use resolver::{resolve, Resolution};
pub use service::{ParseResult, ParseService};
