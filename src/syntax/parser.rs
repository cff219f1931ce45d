//! In-process parse service backed by tree-sitter
//!
//! Converts tree-sitter trees into the crate's `Ast`. Trees containing
//! ERROR or MISSING nodes are reported as failures, one message per
//! offending node in document order.

use std::collections::HashMap;

use tree_sitter::{Language, Parser, TreeCursor};

use super::ast::{Ast, AstNode, SourceRange};
use super::service::{ParseResult, ParseService};

/// Longest source excerpt quoted in an error message
const ERROR_EXCERPT_CHARS: usize = 24;

/// Deepest tree accepted from the grammar
///
/// `AstNode` drops, clones and serializes recursively, so deeper trees are
/// rejected with an error instead of being handed to the session.
pub const MAX_TREE_DEPTH: usize = 1000;

/// Parse service holding one grammar per language id
///
/// Parsers are `!Sync`, so a fresh `Parser` is built for every call; the
/// grammars themselves are cheap shared handles.
pub struct TreeSitterService {
    grammars: HashMap<&'static str, Language>,
}

impl TreeSitterService {
    /// Create a service with every bundled grammar
    pub fn new() -> Self {
        let mut grammars: HashMap<&'static str, Language> = HashMap::new();
        grammars.insert("bash", tree_sitter_bash::LANGUAGE.into());
        grammars.insert("c", tree_sitter_c::LANGUAGE.into());
        grammars.insert("cpp", tree_sitter_cpp::LANGUAGE.into());
        grammars.insert("css", tree_sitter_css::LANGUAGE.into());
        grammars.insert("go", tree_sitter_go::LANGUAGE.into());
        grammars.insert("html", tree_sitter_html::LANGUAGE.into());
        grammars.insert("java", tree_sitter_java::LANGUAGE.into());
        grammars.insert("javascript", tree_sitter_javascript::LANGUAGE.into());
        grammars.insert("json", tree_sitter_json::LANGUAGE.into());
        grammars.insert("php", tree_sitter_php::LANGUAGE_PHP.into());
        grammars.insert("python", tree_sitter_python::LANGUAGE.into());
        grammars.insert("rust", tree_sitter_rust::LANGUAGE.into());
        grammars.insert("toml", tree_sitter_toml_ng::LANGUAGE.into());
        grammars.insert(
            "tsx",
            tree_sitter_typescript::LANGUAGE_TSX.into(),
        );
        grammars.insert(
            "typescript",
            tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        );
        Self { grammars }
    }

    pub fn supports(&self, language: &str) -> bool {
        self.grammars.contains_key(language)
    }

    /// Language ids with a bundled grammar, sorted
    pub fn languages(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.grammars.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for TreeSitterService {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseService for TreeSitterService {
    fn parse(&self, language: &str, code: &str) -> ParseResult {
        let Some(grammar) = self.grammars.get(language) else {
            tracing::debug!("No grammar for {:?}", language);
            return Err(vec![format!("unsupported language: {}", language)]);
        };

        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(grammar) {
            tracing::error!("Failed to set language for {:?}: {}", language, e);
            return Err(vec![format!("incompatible grammar for {}: {}", language, e)]);
        }

        let Some(tree) = parser.parse(code, None) else {
            tracing::error!("Parse failed for {:?}", language);
            return Err(vec![format!("parser returned no tree for {}", language)]);
        };

        let mut errors = Vec::new();
        let mut cursor = tree.walk();
        let root = match convert(&mut cursor, code, &mut errors) {
            Ok(root) => root,
            Err(e) => {
                tracing::warn!("Rejected {} tree: {}", language, e);
                return Err(vec![e]);
            }
        };

        if tree.root_node().has_error() && errors.is_empty() {
            errors.push("syntax error".to_string());
        }

        if errors.is_empty() {
            let ast = Ast::new(language, root);
            tracing::debug!(
                "Parsed {} bytes of {} into {} nodes",
                code.len(),
                language,
                ast.node_count()
            );
            Ok(ast)
        } else {
            tracing::debug!("Parse of {} reported {} errors", language, errors.len());
            Err(errors)
        }
    }
}

/// A node whose children are still being converted
struct OpenNode {
    node: AstNode,
    /// Set for ERROR nodes and everything below them
    inside_error: bool,
}

/// Convert the tree under `cursor` into an `AstNode`
///
/// Walks with an explicit stack of open ancestors, so nesting is bounded by
/// `MAX_TREE_DEPTH` rather than by the worker's call stack.
fn convert(
    cursor: &mut TreeCursor<'_>,
    source: &str,
    errors: &mut Vec<String>,
) -> Result<AstNode, String> {
    let mut open: Vec<OpenNode> = Vec::new();

    loop {
        let inside_error = open.last().is_some_and(|parent| parent.inside_error);
        let current = visit(cursor, source, inside_error, errors);

        if cursor.goto_first_child() {
            if open.len() >= MAX_TREE_DEPTH {
                return Err(format!(
                    "input nested too deeply (more than {} levels)",
                    MAX_TREE_DEPTH
                ));
            }
            open.push(current);
            continue;
        }

        // `done` is complete; attach it and climb until a sibling is left
        let mut done = current.node;
        loop {
            if cursor.goto_next_sibling() {
                match open.last_mut() {
                    Some(parent) => parent.node.children.push(done),
                    None => return Ok(done),
                }
                break;
            }
            let Some(mut parent) = open.pop() else {
                return Ok(done);
            };
            cursor.goto_parent();
            parent.node.children.push(done);
            done = parent.node;
        }
    }
}

/// Childless copy of the node under `cursor`
///
/// ERROR and MISSING nodes are recorded unless an enclosing ERROR already was.
fn visit(
    cursor: &TreeCursor<'_>,
    source: &str,
    inside_error: bool,
    errors: &mut Vec<String>,
) -> OpenNode {
    let node = cursor.node();
    let start = node.start_position();

    let is_error = node.is_error();
    if !inside_error {
        if node.is_missing() {
            errors.push(format!(
                "{}:{}: missing `{}`",
                start.row + 1,
                start.column + 1,
                node.kind()
            ));
        } else if is_error {
            let text = node.utf8_text(source.as_bytes()).unwrap_or_default();
            errors.push(format!(
                "{}:{}: syntax error near `{}`",
                start.row + 1,
                start.column + 1,
                excerpt(text)
            ));
        }
    }

    OpenNode {
        node: AstNode {
            kind: node.kind().to_string(),
            range: SourceRange::new(node.start_byte(), node.end_byte()),
            named: node.is_named(),
            field: cursor.field_name().map(str::to_string),
            children: Vec::new(),
        },
        inside_error: inside_error || is_error,
    }
}

/// First line of `text`, cut to `ERROR_EXCERPT_CHARS`
fn excerpt(text: &str) -> String {
    let line = text.lines().next().unwrap_or("").trim();
    if line.chars().count() > ERROR_EXCERPT_CHARS {
        let cut: String = line.chars().take(ERROR_EXCERPT_CHARS).collect();
        format!("{}…", cut)
    } else {
        line.to_string()
    }
}
