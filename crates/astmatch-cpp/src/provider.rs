//! The `AstProvider` implementation (component B/H): parses C++ source with
//! `tree-sitter-cpp` and materializes a [`RootData`] node table from it.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tree_sitter::{Node as TsNode, Parser};

use astmatch_core::{AstProvider, ContentCache};
use astmatch_error::{Error, ErrorKind, Result};

use crate::node::{CppNode, NodeId, NodeRecord, RootData};
use crate::properties::{derive_properties, is_specifier_keyword};

/// Syntactic wrappers the adapter elides transparently: a node of one of
/// these kinds with exactly one named child is replaced by that child.
const WRAPPER_KINDS: &[&str] = &["parenthesized_expression", "expression_statement"];

/// `tree-sitter-cpp`-backed [`AstProvider`].
#[derive(Default)]
pub struct CppProvider;

impl CppProvider {
    pub fn new() -> Self {
        Self
    }

    fn parse(&self, source: &str) -> Result<tree_sitter::Tree> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_cpp::LANGUAGE.into())
            .map_err(|e| {
                Error::new(ErrorKind::Unexpected, e.to_string()).with_operation("cpp_provider::parse")
            })?;
        parser.parse(source, None).ok_or_else(|| {
            Error::new(ErrorKind::ParseFailed, "tree-sitter returned no tree for this input")
                .with_operation("cpp_provider::parse")
        })
    }

    fn materialize(&self, source: String, logical_name: &str) -> Result<CppNode> {
        let tree = self.parse(&source)?;
        let mut builder = Builder {
            source: source.as_bytes(),
            nodes: Vec::new(),
        };
        let root_id = builder.build(tree.root_node(), None);
        let Builder { nodes, .. } = builder;
        let content_cache = ContentCache::new();
        content_cache.seed(logical_name.to_string(), source.into_bytes());
        let root_data = Arc::new(RootData {
            filename: logical_name.to_string(),
            nodes,
            content_cache,
        });
        Ok(CppNode::new(root_data, root_id))
    }
}

impl AstProvider for CppProvider {
    type Node = CppNode;

    fn load(&self, path: &Path) -> Result<Self::Node> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::from(e)
                .with_operation("cpp_provider::load")
                .with_context("path", path.display().to_string())
        })?;
        let logical_name = path.to_string_lossy().into_owned();
        tracing::debug!(file = %logical_name, "cpp_provider: parsing file");
        self.materialize(content, &logical_name)
    }

    fn load_from_text(&self, content: &str, logical_name: &str) -> Result<Self::Node> {
        tracing::debug!(name = logical_name, "cpp_provider: parsing in-memory text");
        self.materialize(content.to_string(), logical_name)
    }
}

struct Builder<'s> {
    source: &'s [u8],
    nodes: Vec<NodeRecord>,
}

impl<'s> Builder<'s> {
    fn build(&mut self, ts_node: TsNode<'_>, parent: Option<NodeId>) -> NodeId {
        if let Some(collapsed) = self.elide(ts_node) {
            return self.build(collapsed, parent);
        }

        let id = NodeId(self.nodes.len());
        let name = resolve_name(ts_node, self.source);
        let raw_text = ts_node.utf8_text(self.source).unwrap_or("");
        let operator = resolve_operator(ts_node, self.source);
        let specifiers = unnamed_child_texts(ts_node, self.source)
            .filter(|text| is_specifier_keyword(text))
            .map(|text| text.to_string());
        let properties = derive_properties(&name, ts_node.kind(), raw_text, operator.as_deref(), specifiers);

        self.nodes.push(NodeRecord {
            kind: ts_node.kind().to_string(),
            name,
            start: ts_node.start_byte(),
            end: ts_node.end_byte(),
            properties,
            parent,
            children: OnceCell::new(),
        });

        let mut cursor = ts_node.walk();
        let child_ids: Vec<NodeId> = ts_node
            .named_children(&mut cursor)
            .map(|child| self.build(child, Some(id)))
            .collect();
        self.nodes[id.0]
            .children
            .set(child_ids)
            .unwrap_or_else(|_| unreachable!("children set exactly once per node"));
        id
    }

    /// If `ts_node` is a thin wrapper with exactly one named child, return
    /// that child so the caller re-enters `build` on it directly instead of
    /// materializing the wrapper. Nested wrappers (parens around parens)
    /// collapse fully since the recursive call checks again.
    fn elide<'t>(&self, ts_node: TsNode<'t>) -> Option<TsNode<'t>> {
        if !WRAPPER_KINDS.contains(&ts_node.kind()) {
            return None;
        }
        if ts_node.named_child_count() != 1 {
            return None;
        }
        ts_node.named_child(0)
    }
}

/// Walk the `name`/`declarator` field chain down to the innermost simple
/// identifier, the tree-sitter analogue of libclang's cursor spelling.
///
/// A bare identifier used in reference position (not as someone else's
/// `name`/`declarator` field) names itself — this is what lets a
/// placeholder like `$cond`, parsed as a standalone identifier expression,
/// carry its own spelling as `AstNode::name()` for the match finder to key
/// wildcard bindings on.
fn resolve_name(ts_node: TsNode<'_>, source: &[u8]) -> String {
    if matches!(ts_node.kind(), "identifier" | "field_identifier" | "type_identifier") {
        return ts_node.utf8_text(source).unwrap_or("").to_string();
    }
    let mut current = ts_node
        .child_by_field_name("name")
        .or_else(|| ts_node.child_by_field_name("declarator"));
    while let Some(node) = current {
        if matches!(node.kind(), "identifier" | "field_identifier" | "type_identifier") {
            return node.utf8_text(source).unwrap_or("").to_string();
        }
        current = node
            .child_by_field_name("declarator")
            .or_else(|| node.child_by_field_name("name"));
    }
    String::new()
}

/// Operator spelling for a `binary_expression`: the stripped byte range
/// between the left operand's end and the right operand's start.
fn resolve_operator(ts_node: TsNode<'_>, source: &[u8]) -> Option<String> {
    if ts_node.kind() != "binary_expression" {
        return None;
    }
    let left = ts_node.child_by_field_name("left")?;
    let right = ts_node.child_by_field_name("right")?;
    let between = source.get(left.end_byte()..right.start_byte())?;
    let text = std::str::from_utf8(between).ok()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn unnamed_child_texts<'t>(ts_node: TsNode<'t>, source: &'t [u8]) -> impl Iterator<Item = &'t str> {
    let mut cursor = ts_node.walk();
    let children: Vec<TsNode<'t>> = ts_node.children(&mut cursor).filter(|c| !c.is_named()).collect();
    children.into_iter().filter_map(move |c| c.utf8_text(source).ok())
}
