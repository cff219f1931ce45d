//! astscope - Elm-style syntax tree explorer
//!
//! This crate provides the session core for exploring the syntax tree of a
//! piece of code: language resolution, the parse request lifecycle, the
//! bidirectional editor/tree selection bridge and the error log, all driven
//! through the Elm Architecture pattern.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod messages;
pub mod model;
pub mod runtime;
pub mod surface;
pub mod syntax;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::ExplorerConfig;
pub use messages::Msg;
pub use model::AppModel;
pub use runtime::Explorer;
