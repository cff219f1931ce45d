//! Headless tree surface that renders an indented outline

use std::fmt::Write as _;

use super::TreeSurface;
use crate::messages::SelectionMsg;
use crate::syntax::{Ast, AstNode, SourceRange};

/// What the view currently marks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selected {
    /// Innermost node at an editor cursor position
    Position(usize),
    /// Node picked in the view itself
    Node(SourceRange),
}

/// Outline view of the last tree
#[derive(Debug, Default)]
pub struct TreeView {
    selected: Option<Selected>,
    named_only: bool,
}

impl TreeView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only show named nodes
    pub fn with_named_only(mut self, named_only: bool) -> Self {
        self.named_only = named_only;
        self
    }

    /// Position last passed to `select_node`, unless a pick replaced it
    pub fn selected_position(&self) -> Option<usize> {
        match self.selected {
            Some(Selected::Position(pos)) => Some(pos),
            _ => None,
        }
    }

    /// Range of the node last picked in the view
    pub fn picked_range(&self) -> Option<SourceRange> {
        match self.selected {
            Some(Selected::Node(range)) => Some(range),
            _ => None,
        }
    }

    /// User picked `node`, returning the event to dispatch
    pub fn pick(&mut self, node: &AstNode) -> SelectionMsg {
        self.selected = Some(Selected::Node(node.range));
        SelectionMsg::NodeSelected {
            from: node.range.from,
            to: node.range.to,
        }
    }

    /// User cleared the selection
    pub fn deselect(&mut self) -> SelectionMsg {
        self.selected = None;
        SelectionMsg::Deselected
    }

    /// Render `ast` as one line per node, marking the selected node with `>`
    pub fn render(&self, ast: &Ast) -> String {
        let marked = self.selected.and_then(|selected| match selected {
            Selected::Position(pos) => ast.node_at(pos),
            Selected::Node(range) => ast.node_for_range(range),
        });

        let mut out = String::new();
        for (depth, node) in ast.walk() {
            if self.named_only && !node.named {
                continue;
            }

            let marker = match marked {
                Some(m) if std::ptr::eq(m, node) => '>',
                _ => ' ',
            };
            let _ = write!(out, "{} {}", marker, "  ".repeat(depth));
            if let Some(field) = &node.field {
                let _ = write!(out, "{}: ", field);
            }
            if node.named {
                let _ = write!(out, "{}", node.kind);
            } else {
                let _ = write!(out, "{:?}", node.kind);
            }
            let _ = writeln!(out, " [{}]", node.range);
        }
        out
    }
}

impl TreeSurface for TreeView {
    fn select_node(&mut self, position: usize) {
        self.selected = Some(Selected::Position(position));
    }
}
