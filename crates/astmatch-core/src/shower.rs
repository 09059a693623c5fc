//! Diagnostic pretty-printer (component G) for any [`AstNode`] tree.

use std::fmt::Write as _;

use crate::ast::AstNode;

/// Pretty-prints a subtree for debugging: one node per line, indented by
/// depth, in the form `(<kind>, <file>[<start>:<end>]): |<raw>|`. Nodes
/// outside the translation unit (pulled in from an included header) are
/// skipped, along with their descendants.
pub struct Shower {
    indent_width: usize,
}

impl Default for Shower {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

impl Shower {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent_width(indent_width: usize) -> Self {
        Self { indent_width }
    }

    /// Render `root`'s subtree to a freshly allocated string.
    pub fn render<N: AstNode>(&self, root: &N) -> String {
        let mut out = String::new();
        self.write(&mut out, root, 0);
        out
    }

    fn write<N: AstNode>(&self, out: &mut String, node: &N, depth: usize) {
        if !node.is_part_of_translation_unit() {
            return;
        }
        let indent = " ".repeat(depth * self.indent_width);
        let start = node.start_offset();
        let end = start + node.length();
        let header = format!(
            "{indent}({}, {}[{start}:{end}]): |",
            node.kind(),
            node.containing_filename()
        );
        let raw = node.raw_signature();
        let mut lines = raw.lines();
        match lines.next() {
            Some(first) => {
                let _ = write!(out, "{header}{first}");
            }
            None => {
                let _ = write!(out, "{header}");
            }
        }
        for line in lines {
            out.push('\n');
            let _ = write!(out, "{indent}{line}");
        }
        out.push_str("|\n");
        for child in node.children() {
            self.write(out, &child, depth + 1);
        }
    }
}
