//! A tiny in-memory tree used only by this crate's own unit tests, so
//! `astmatch-core`'s traversal/matching logic can be exercised without
//! depending on a concrete provider (which would create a dependency
//! cycle with `astmatch-cpp`).

#![cfg(test)]

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::{AstNode, PropertyMap};

struct Inner {
    kind: String,
    name: String,
    properties: PropertyMap,
    children: Vec<TreeNode>,
    parent: RefCell<Option<TreeNode>>,
}

#[derive(Clone)]
pub struct TreeNode(Rc<Inner>);

impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for TreeNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeNode")
            .field("kind", &self.0.kind)
            .field("name", &self.0.name)
            .finish()
    }
}

impl TreeNode {
    pub fn leaf(kind: &str) -> Self {
        Self::build(kind, vec![])
    }

    pub fn build(kind: &str, children: Vec<TreeNode>) -> Self {
        Self::build_with_properties(kind, PropertyMap::new(), children)
    }

    pub fn build_with_properties(
        kind: &str,
        properties: PropertyMap,
        children: Vec<TreeNode>,
    ) -> Self {
        let node = TreeNode(Rc::new(Inner {
            kind: kind.to_string(),
            name: String::new(),
            properties,
            children,
            parent: RefCell::new(None),
        }));
        for child in &node.0.children {
            *child.0.parent.borrow_mut() = Some(node.clone());
        }
        node
    }

    pub fn named(kind: &str, name: &str) -> Self {
        let node = TreeNode(Rc::new(Inner {
            kind: kind.to_string(),
            name: name.to_string(),
            properties: PropertyMap::new(),
            children: vec![],
            parent: RefCell::new(None),
        }));
        node
    }
}

impl AstNode for TreeNode {
    fn kind(&self) -> &str {
        &self.0.kind
    }

    fn name(&self) -> &str {
        &self.0.name
    }

    fn containing_filename(&self) -> &str {
        "test.cpp"
    }

    fn start_offset(&self) -> usize {
        0
    }

    fn length(&self) -> usize {
        0
    }

    fn properties(&self) -> &PropertyMap {
        &self.0.properties
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent.borrow().clone()
    }

    fn children(&self) -> Vec<Self> {
        self.0.children.clone()
    }

    fn root(&self) -> Self {
        match self.parent() {
            Some(parent) => parent.root(),
            None => self.clone(),
        }
    }

    fn raw_signature(&self) -> String {
        if self.0.name.is_empty() {
            self.0.kind.clone()
        } else {
            self.0.name.clone()
        }
    }
}
