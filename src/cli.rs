//! Command-line argument parsing for the explorer
//!
//! Supports:
//! - Reading code from a file or stdin
//! - Forcing a language or letting the extension decide
//! - Replaying a cursor move and a tree-node pick after the parse
//! - Tree or JSON output

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::ExplorerConfig;
use crate::syntax::SourceRange;

/// Parse source code and explore its syntax tree
#[derive(Parser, Debug)]
#[command(name = "astscope", version, about = "Explore the syntax tree of source code")]
pub struct CliArgs {
    /// File to parse (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Language id, or `auto` to use the detected language
    #[arg(short = 'l', long, value_name = "LANG")]
    pub language: Option<String>,

    /// Move the cursor after parsing: byte offset `N` or 1-indexed `LINE:COL`
    #[arg(long, value_name = "N|LINE:COL", value_parser = parse_cursor)]
    pub cursor: Option<CursorArg>,

    /// Pick the tree node spanning this byte range and highlight it
    #[arg(long, value_name = "FROM:TO", value_parser = parse_range)]
    pub pick: Option<SourceRange>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Tree)]
    pub format: OutputFormat,

    /// Only show named nodes in tree output
    #[arg(long)]
    pub named_only: bool,

    /// Parse timeout in milliseconds (0 disables)
    #[arg(long, value_name = "N")]
    pub timeout_ms: Option<u64>,

    /// Language registry file (YAML)
    #[arg(long, value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// List registered languages and exit
    #[arg(long)]
    pub list_languages: bool,
}

/// How the parsed tree is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented outline
    Tree,
    /// JSON report
    Json,
}

/// Cursor position as given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorArg {
    /// Byte offset
    Offset(usize),
    /// 0-indexed line and column (converted from 1-indexed user input)
    LineCol(usize, usize),
}

impl CliArgs {
    /// Apply flags that override the loaded config
    pub fn apply_overrides(&self, config: &mut ExplorerConfig) {
        if let Some(timeout) = self.timeout_ms {
            config.parse_timeout_ms = timeout;
        }
        if let Some(path) = &self.registry {
            config.registry = Some(path.clone());
        }
    }
}

fn parse_range(s: &str) -> Result<SourceRange, String> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FROM:TO, got {:?}", s))?;
    let from = from
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid FROM {:?}: {}", from, e))?;
    let to = to
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid TO {:?}: {}", to, e))?;
    Ok(SourceRange::new(from, to))
}

fn parse_cursor(s: &str) -> Result<CursorArg, String> {
    match s.split_once(':') {
        Some((line, col)) => {
            let line = line
                .trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid LINE {:?}: {}", line, e))?;
            let col = col
                .trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid COL {:?}: {}", col, e))?;
            // Convert from 1-indexed (user input) to 0-indexed (internal)
            Ok(CursorArg::LineCol(
                line.saturating_sub(1),
                col.saturating_sub(1),
            ))
        }
        None => s
            .trim()
            .parse::<usize>()
            .map(CursorArg::Offset)
            .map_err(|e| format!("invalid offset {:?}: {}", s, e)),
    }
}
