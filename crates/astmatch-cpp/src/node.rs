//! The concrete node type (component A/B): a small `Copy` handle into a
//! [`RootData`] node table, plus the table itself.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use astmatch_core::{AstNode, ContentCache, PropertyMap};

/// Index into a [`RootData`]'s flat node table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(pub(crate) usize);

/// One materialized node. Children are written exactly once, during root
/// construction — tree-sitter already performs a full traversal to build
/// its own tree, so there is no benefit to lazily recomputing ours, but the
/// `OnceCell` still documents (and enforces) the one-shot discipline the
/// rest of the corpus expects of memoized derived data.
pub(crate) struct NodeRecord {
    pub(crate) kind: String,
    pub(crate) name: String,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) properties: PropertyMap,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: OnceCell<Vec<NodeId>>,
}

/// Owns the full node table and content cache for one parsed translation
/// unit. Shared via `Arc` so every [`CppNode`] handle can be `Clone` + `Send`
/// + `Sync` without duplicating the tree.
pub struct RootData {
    pub(crate) filename: String,
    pub(crate) nodes: Vec<NodeRecord>,
    pub(crate) content_cache: ContentCache,
}

/// Read-only handle to one node of a parsed C++ translation unit.
///
/// Cloning a `CppNode` clones the `Arc` to its root, not the subtree —
/// `parent()` and `children()` are index lookups into the shared table, not
/// separate allocations.
#[derive(Clone)]
pub struct CppNode {
    pub(crate) root: Arc<RootData>,
    pub(crate) id: NodeId,
}

impl PartialEq for CppNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.root, &other.root) && self.id == other.id
    }
}

impl CppNode {
    pub(crate) fn new(root: Arc<RootData>, id: NodeId) -> Self {
        Self { root, id }
    }

    fn record(&self) -> &NodeRecord {
        &self.root.nodes[self.id.0]
    }
}

impl AstNode for CppNode {
    fn kind(&self) -> &str {
        &self.record().kind
    }

    fn name(&self) -> &str {
        &self.record().name
    }

    fn containing_filename(&self) -> &str {
        &self.root.filename
    }

    fn start_offset(&self) -> usize {
        self.record().start
    }

    fn length(&self) -> usize {
        self.record().end - self.record().start
    }

    fn properties(&self) -> &PropertyMap {
        &self.record().properties
    }

    fn parent(&self) -> Option<Self> {
        self.record().parent.map(|id| CppNode::new(self.root.clone(), id))
    }

    fn children(&self) -> Vec<Self> {
        self.record()
            .children
            .get()
            .expect("children are populated for every node during root construction")
            .iter()
            .map(|&id| CppNode::new(self.root.clone(), id))
            .collect()
    }

    fn root(&self) -> Self {
        CppNode::new(self.root.clone(), NodeId(0))
    }

    fn raw_signature(&self) -> String {
        let record = self.record();
        if record.end == record.start || self.root.filename.is_empty() {
            return String::new();
        }
        self.root
            .content_cache
            .get_content(&self.root.filename, record.start, record.end)
            .unwrap_or_default()
    }
}
