//! The uniform AST node interface that every concrete provider satisfies.
//!
//! Everything downstream of this module — traversal, pattern matching, the
//! shower — depends only on [`AstNode`]. A provider crate (e.g. `astmatch-cpp`)
//! supplies one concrete type implementing it; the matcher never knows or
//! cares which parser produced the tree.

use std::collections::BTreeMap;
use std::fmt;

/// A single property value attached to a node.
///
/// The distilled model calls properties "string to string/int"; boolean
/// parser predicates (`is_const`, `is_static`, ...) are folded in as `Bool`
/// so a provider can record "this flag was present" without inventing a
/// string encoding for it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum PropertyValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Str(s) => write!(f, "{s}"),
            PropertyValue::Int(i) => write!(f, "{i}"),
            PropertyValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Ordered-by-key property map. `BTreeMap` gives us value equality
/// independent of insertion order, which is what `is_matching` needs: two
/// nodes with the same properties inserted in different orders must compare
/// equal.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// Result of a single [`AstNode::accept`] visitation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitorResult {
    /// Stop the whole traversal immediately.
    Abort,
    /// Descend into this node's children.
    Continue,
    /// Do not descend into this node's children, but keep visiting siblings.
    Skip,
}

/// Read-only, uniform view over one AST node.
///
/// Implementors are small `Copy` handles (an index into the owning root's
/// node table plus a reference to that root) rather than owning their
/// subtree directly — see `astmatch-cpp::CppNode` for the canonical
/// implementation. This keeps `parent()` a genuinely non-owning reference:
/// a node can point at its parent without keeping the parent (and thus the
/// whole tree) alive through a strong-reference cycle.
pub trait AstNode: Clone + PartialEq {
    /// Syntactic category of this node (a provider-specific string tag).
    fn kind(&self) -> &str;

    /// Node name, empty when the node has none.
    fn name(&self) -> &str;

    /// Path/logical name of the file this node was parsed from.
    fn containing_filename(&self) -> &str;

    /// Byte offset of the first byte of this node's source range.
    fn start_offset(&self) -> usize;

    /// Length in bytes of this node's source range.
    fn length(&self) -> usize;

    /// Kind-specific attributes (operator spelling, literal spelling,
    /// boolean parser predicates, ...).
    fn properties(&self) -> &PropertyMap;

    /// Non-owning reference to the parent, `None` only for the root.
    fn parent(&self) -> Option<Self>;

    /// Children in source order.
    fn children(&self) -> Vec<Self>;

    /// The translation-unit root this node was produced from.
    fn root(&self) -> Self;

    /// Exact source bytes that produced this node, decoded as UTF-8.
    ///
    /// Empty when `length() == 0` or `containing_filename()` is empty.
    fn raw_signature(&self) -> String;

    /// Whether this node belongs to the translation unit itself, as opposed
    /// to a node that originated from an included file.
    fn is_part_of_translation_unit(&self) -> bool {
        self.containing_filename() == self.root().containing_filename()
    }

    /// Structural equality at one level: same kind, same properties.
    ///
    /// Deliberately shallow — it does not recurse into children. Callers
    /// that need subtree equality compose this with a traversal.
    fn is_matching(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.properties() == other.properties()
    }

    /// Pre-order traversal visiting every descendant exactly once.
    fn process(&self, f: &mut impl FnMut(&Self)) {
        f(self);
        for child in self.children() {
            child.process(f);
        }
    }

    /// Pre-order traversal with early-exit control.
    ///
    /// `Continue` descends into children, `Skip` moves on to the next
    /// sibling without descending, `Abort` stops the whole walk.
    fn accept(&self, f: &mut impl FnMut(&Self) -> VisitorResult) -> VisitorResult {
        match f(self) {
            VisitorResult::Continue => {
                for child in self.children() {
                    if child.accept(f) == VisitorResult::Abort {
                        return VisitorResult::Abort;
                    }
                }
                VisitorResult::Continue
            }
            other => other,
        }
    }
}
