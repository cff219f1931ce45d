//! Syntax tree returned by a parse service
//!
//! The session treats the tree as opaque beyond byte ranges: every node
//! exposes a `SourceRange`, and positions can be mapped back to the
//! innermost enclosing node.

use serde::{Deserialize, Serialize};

/// Half-open byte range `[from, to)` in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceRange {
    pub from: usize,
    pub to: usize,
}

impl SourceRange {
    /// Create a range, swapping the bounds if they arrive reversed
    pub fn new(from: usize, to: usize) -> Self {
        if from <= to {
            Self { from, to }
        } else {
            Self { from: to, to: from }
        }
    }

    /// Zero for a range whose public bounds were set reversed
    pub fn len(&self) -> usize {
        self.to.saturating_sub(self.from)
    }

    /// Zero-width ranges are legal (e.g. a MISSING node)
    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Check whether a cursor at `pos` touches this range
    ///
    /// The end bound is inclusive here: a cursor sitting right after the
    /// last character of a token is still "on" that token.
    pub fn touches(&self, pos: usize) -> bool {
        self.from <= pos && pos <= self.to
    }

    /// Strict half-open containment
    pub fn contains(&self, pos: usize) -> bool {
        self.from <= pos && pos < self.to
    }

    pub fn encloses(&self, other: &SourceRange) -> bool {
        self.from <= other.from && other.to <= self.to
    }
}

impl std::fmt::Display for SourceRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}

/// A single node of the syntax tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstNode {
    /// Grammar node type (e.g. `function_definition`)
    pub kind: String,
    /// Byte range covered by this node
    pub range: SourceRange,
    /// Named nodes are grammar rules; anonymous nodes are punctuation/keywords
    #[serde(default = "default_named")]
    pub named: bool,
    /// Field name under which the parent holds this node, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AstNode>,
}

fn default_named() -> bool {
    true
}

impl AstNode {
    pub fn new(kind: impl Into<String>, range: SourceRange) -> Self {
        Self {
            kind: kind.into(),
            range,
            named: true,
            field: None,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<AstNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn anonymous(mut self) -> Self {
        self.named = false;
        self
    }

    /// Pick the child a cursor at `pos` belongs to
    ///
    /// A child that strictly contains `pos` wins; otherwise the last child
    /// whose end touches `pos` (cursor at end of token, zero-width nodes).
    fn child_at(&self, pos: usize) -> Option<&AstNode> {
        self.children
            .iter()
            .find(|c| c.range.contains(pos))
            .or_else(|| self.children.iter().rev().find(|c| c.range.touches(pos)))
    }
}

/// A complete parse result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ast {
    /// Language id the tree was parsed as
    pub language: String,
    pub root: AstNode,
}

impl Ast {
    pub fn new(language: impl Into<String>, root: AstNode) -> Self {
        Self {
            language: language.into(),
            root,
        }
    }

    /// A successful parse of empty input
    pub fn empty(language: impl Into<String>) -> Self {
        Self::new(language, AstNode::new("source", SourceRange::default()))
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty() && self.root.range.is_empty()
    }

    /// Innermost node enclosing `pos`, or `None` if `pos` is outside the tree
    pub fn node_at(&self, pos: usize) -> Option<&AstNode> {
        if !self.root.range.touches(pos) {
            return None;
        }

        let mut node = &self.root;
        while let Some(child) = node.child_at(pos) {
            node = child;
        }
        Some(node)
    }

    /// Innermost node covering exactly `range`
    pub fn node_for_range(&self, range: SourceRange) -> Option<&AstNode> {
        if !self.root.range.encloses(&range) {
            return None;
        }

        let mut node = &self.root;
        let mut found = (node.range == range).then_some(node);
        while let Some(child) = node.children.iter().find(|c| c.range.encloses(&range)) {
            node = child;
            if node.range == range {
                found = Some(node);
            }
        }
        found
    }

    /// Depth-first pre-order walk yielding `(depth, node)`
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, &self.root)],
        }
    }

    pub fn node_count(&self) -> usize {
        self.walk().count()
    }
}

/// Iterator returned by [`Ast::walk`]
pub struct Walk<'a> {
    stack: Vec<(usize, &'a AstNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a AstNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|c| (depth + 1, c)));
        Some((depth, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Ast {
        // x = foo(1)
        Ast::new(
            "python",
            AstNode::new("module", SourceRange::new(0, 10)).with_children(vec![AstNode::new(
                "assignment",
                SourceRange::new(0, 10),
            )
            .with_children(vec![
                AstNode::new("identifier", SourceRange::new(0, 1)).with_field("left"),
                AstNode::new("=", SourceRange::new(2, 3)).anonymous(),
                AstNode::new("call", SourceRange::new(4, 10))
                    .with_field("right")
                    .with_children(vec![
                        AstNode::new("identifier", SourceRange::new(4, 7)),
                        AstNode::new("argument_list", SourceRange::new(7, 10)),
                    ]),
            ])]),
        )
    }

    #[test]
    fn test_source_range_normalizes_reversed_bounds() {
        assert_eq!(SourceRange::new(9, 3), SourceRange { from: 3, to: 9 });
        assert_eq!(SourceRange::new(9, 3).len(), 6);
    }

    #[test]
    fn test_len_of_reversed_literal_does_not_underflow() {
        let reversed: SourceRange = serde_json::from_str(r#"{"from": 9, "to": 3}"#).unwrap();
        assert_eq!(reversed.len(), 0);
        assert_eq!(SourceRange { from: 5, to: 2 }.len(), 0);
    }

    #[test]
    fn test_node_at_returns_innermost() {
        let ast = sample();
        assert_eq!(ast.node_at(5).unwrap().kind, "identifier");
        assert_eq!(ast.node_at(8).unwrap().kind, "argument_list");
        assert_eq!(ast.node_at(2).unwrap().kind, "=");
    }

    #[test]
    fn test_node_at_prefers_token_starting_at_cursor() {
        let ast = sample();
        // Position 7 ends `foo` and starts `(1)`
        assert_eq!(ast.node_at(7).unwrap().kind, "argument_list");
    }

    #[test]
    fn test_node_at_end_of_input_is_enclosed() {
        let ast = sample();
        assert_eq!(ast.node_at(10).unwrap().kind, "argument_list");
    }

    #[test]
    fn test_node_at_gap_falls_back_to_parent() {
        let ast = sample();
        // Whitespace between `x` and `=`
        assert_eq!(ast.node_at(1).unwrap().kind, "identifier");
        let ast = Ast::new(
            "go",
            AstNode::new("file", SourceRange::new(0, 20))
                .with_children(vec![AstNode::new("decl", SourceRange::new(5, 8))]),
        );
        assert_eq!(ast.node_at(12).unwrap().kind, "file");
    }

    #[test]
    fn test_node_at_outside_tree() {
        let ast = sample();
        assert!(ast.node_at(11).is_none());
    }

    #[test]
    fn test_node_at_zero_width_child() {
        let ast = Ast::new(
            "go",
            AstNode::new("file", SourceRange::new(0, 6)).with_children(vec![
                AstNode::new("call", SourceRange::new(0, 5)),
                AstNode::new(")", SourceRange::new(5, 5)),
            ]),
        );
        assert_eq!(ast.node_at(5).unwrap().kind, ")");
    }

    #[test]
    fn test_empty_tree() {
        let ast = Ast::empty("python");
        assert!(ast.is_empty());
        assert_eq!(ast.node_at(0).unwrap().kind, "source");
        assert!(ast.node_at(1).is_none());
    }

    #[test]
    fn test_node_for_range_picks_innermost_exact_match() {
        let ast = sample();
        assert_eq!(
            ast.node_for_range(SourceRange::new(0, 10)).unwrap().kind,
            "assignment"
        );
        assert_eq!(
            ast.node_for_range(SourceRange::new(4, 7)).unwrap().kind,
            "identifier"
        );
        assert!(ast.node_for_range(SourceRange::new(3, 6)).is_none());
    }

    #[test]
    fn test_walk_is_preorder_with_depth() {
        let ast = sample();
        let kinds: Vec<(usize, &str)> = ast.walk().map(|(d, n)| (d, n.kind.as_str())).collect();
        assert_eq!(
            kinds,
            vec![
                (0, "module"),
                (1, "assignment"),
                (2, "identifier"),
                (2, "="),
                (2, "call"),
                (3, "identifier"),
                (3, "argument_list"),
            ]
        );
        assert_eq!(ast.node_count(), 7);
    }

    #[test]
    fn test_json_shape() {
        let ast = Ast::new(
            "go",
            AstNode::new("file", SourceRange::new(0, 3))
                .with_children(vec![AstNode::new("{", SourceRange::new(0, 1)).anonymous()]),
        );
        let json = serde_json::to_value(&ast).unwrap();
        assert_eq!(json["root"]["range"]["to"], 3);
        assert_eq!(json["root"]["children"][0]["named"], false);
        assert!(json["root"].get("field").is_none());

        let back: Ast = serde_json::from_value(json).unwrap();
        assert_eq!(back, ast);
    }
}
