use std::io::Read;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use astscope::cli::{CliArgs, CursorArg, OutputFormat};
use astscope::config::ExplorerConfig;
use astscope::config_paths;
use astscope::messages::{LanguageMsg, ParseMsg, SelectionMsg};
use astscope::model::{AppModel, ErrorLog, ParseStatus};
use astscope::runtime::Explorer;
use astscope::surface::{BufferSurface, TreeView};
use astscope::syntax::{Ast, LanguageRegistry, SourceRange, TreeSitterService};

/// Extra wait past the session's own timeout before giving up
const PARSE_WAIT_GRACE: Duration = Duration::from_secs(1);

/// Wait cap used when the session timeout is disabled
const PARSE_WAIT_CAP: Duration = Duration::from_secs(300);

/// JSON output shape
#[derive(Serialize)]
struct Report<'a> {
    language: String,
    edit_mode: String,
    status: &'static str,
    ast: Option<&'a Ast>,
    errors: &'a ErrorLog,
    cursor_node: Option<SourceRange>,
    highlight: Option<HighlightReport>,
}

#[derive(Serialize)]
struct HighlightReport {
    range: SourceRange,
    text: String,
}

fn main() -> Result<ExitCode> {
    astscope::tracing::init();

    let args = CliArgs::parse();
    let mut config = ExplorerConfig::load();
    args.apply_overrides(&mut config);

    let registry = load_registry(&config)?;
    let service = Arc::new(TreeSitterService::new());

    if args.list_languages {
        for entry in registry.iter() {
            let marker = if service.supports(&entry.id) { "*" } else { " " };
            println!(
                "{} {:<12} {:<14} {:<12} {}",
                marker,
                entry.id,
                entry.display_name,
                entry.edit_mode.as_deref().unwrap_or("-"),
                entry.extensions.join(" ")
            );
        }
        return Ok(ExitCode::SUCCESS);
    }

    let code = read_source(args.file.as_deref())?;
    let detected = args
        .file
        .as_deref()
        .and_then(|path| registry.detect_from_path(path))
        .unwrap_or(config.fallback_language.as_str())
        .to_string();
    tracing::debug!("Detected language {:?}", detected);

    let model = AppModel::new(registry, config, detected);
    let tree_view = TreeView::new().with_named_only(args.named_only);
    let mut explorer = Explorer::new(model, BufferSurface::new(), tree_view, service);

    if let Some(language) = &args.language {
        explorer.dispatch(LanguageMsg::Select(language.clone()));
    }
    let change = explorer.source_mut().set_text(&code);
    explorer.dispatch(change);
    explorer.dispatch(ParseMsg::Start);
    let limit = parse_wait_limit(&explorer.model().config);
    if !explorer.wait_for_parse(Some(limit)) {
        anyhow::bail!("Parse did not finish within {:?}", limit);
    }

    if let Some(cursor) = args.cursor {
        let offset = match cursor {
            CursorArg::Offset(offset) => offset,
            CursorArg::LineCol(line, col) => explorer.source().byte_offset(line, col),
        };
        let moved = explorer.source_mut().move_cursor(offset);
        explorer.dispatch(moved);
    }

    if let Some(range) = args.pick {
        let node = explorer
            .model()
            .session
            .ast
            .as_ref()
            .and_then(|ast| ast.node_for_range(range))
            .cloned();
        let picked = match node {
            Some(node) => explorer.tree_mut().pick(&node),
            None => SelectionMsg::NodeSelected {
                from: range.from,
                to: range.to,
            },
        };
        explorer.dispatch(picked);
    }

    match args.format {
        OutputFormat::Tree => print_tree(&explorer),
        OutputFormat::Json => print_json(&explorer)?,
    }

    if explorer.model().session.parse_status == ParseStatus::Failed {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

fn parse_wait_limit(config: &ExplorerConfig) -> Duration {
    config
        .parse_timeout()
        .map(|ms| Duration::from_millis(ms) + PARSE_WAIT_GRACE)
        .unwrap_or(PARSE_WAIT_CAP)
}

fn load_registry(config: &ExplorerConfig) -> Result<LanguageRegistry> {
    let path = config
        .registry
        .clone()
        .or_else(|| config_paths::registry_file().filter(|p| p.exists()));

    match path {
        Some(path) => LanguageRegistry::load(&path)
            .with_context(|| format!("Failed to load language registry {}", path.display())),
        None => Ok(LanguageRegistry::builtin()),
    }
}

fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut code = String::new();
            std::io::stdin()
                .read_to_string(&mut code)
                .context("Failed to read stdin")?;
            Ok(code)
        }
    }
}

fn highlight_report(explorer: &Explorer<BufferSurface, TreeView>) -> Option<HighlightReport> {
    let range = explorer.highlight().range()?;
    Some(HighlightReport {
        range,
        text: explorer.source().slice(range),
    })
}

fn print_tree(explorer: &Explorer<BufferSurface, TreeView>) {
    let model = explorer.model();
    let resolution = model.resolution();

    println!(
        "language: {} (mode: {})",
        resolution.effective_language, resolution.edit_mode
    );
    println!("status: {}", model.session.parse_status.label());

    if let Some(ast) = &model.session.ast {
        print!("{}", explorer.tree().render(ast));
    }

    if let Some(highlight) = highlight_report(explorer) {
        let (line, col) = explorer.source().line_col(highlight.range.from);
        println!(
            "highlight {} ({}:{}): {:?}",
            highlight.range,
            line + 1,
            col + 1,
            highlight.text
        );
    }

    for (index, error) in model.session.errors.iter().enumerate() {
        eprintln!("error[{}]: {}", index, error.text);
    }
}

fn print_json(explorer: &Explorer<BufferSurface, TreeView>) -> Result<()> {
    let model = explorer.model();
    let resolution = model.resolution();

    let report = Report {
        language: resolution.effective_language,
        edit_mode: resolution.edit_mode,
        status: model.session.parse_status.label(),
        ast: model.session.ast.as_ref(),
        errors: &model.session.errors,
        cursor_node: model.selection.cursor_node,
        highlight: highlight_report(explorer),
    };

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}
