//! Traversal utilities (component D): a generic pre-order walk plus the
//! `find_kind` specialization used to locate stub nodes during pattern
//! extraction and to feed the match finder.

use regex::Regex;
use std::collections::VecDeque;

use crate::ast::AstNode;
use astmatch_error::{Error, ErrorKind, Result};

/// Pending pre-order scan of one subtree list: the remaining siblings plus
/// buffered-but-not-yet-yielded outputs from the generator function.
struct Frame<N> {
    nodes: VecDeque<N>,
    pending: VecDeque<N>,
}

/// Lazy pre-order iterator produced by [`find_all`].
///
/// Implemented as an explicit stack of scan frames rather than recursion so
/// that callers can stop consuming early (`.take(n)`, a `for` loop `break`)
/// without having already paid for the rest of the tree.
pub struct FindAll<'f, N, F> {
    stack: Vec<Frame<N>>,
    generator: &'f F,
}

impl<'f, N, F> FindAll<'f, N, F>
where
    N: AstNode,
    F: Fn(&N) -> Vec<N>,
{
    fn new(roots: &[N], generator: &'f F) -> Self {
        let frame = Frame {
            nodes: roots.iter().cloned().collect(),
            pending: VecDeque::new(),
        };
        Self {
            stack: vec![frame],
            generator,
        }
    }
}

impl<'f, N, F> Iterator for FindAll<'f, N, F>
where
    N: AstNode,
    F: Fn(&N) -> Vec<N>,
{
    type Item = N;

    fn next(&mut self) -> Option<N> {
        loop {
            let frame = self.stack.last_mut()?;
            if let Some(item) = frame.pending.pop_front() {
                return Some(item);
            }
            let Some(node) = frame.nodes.pop_front() else {
                self.stack.pop();
                continue;
            };
            frame.pending = (self.generator)(&node).into();
            let children = node.children();
            if !children.is_empty() {
                self.stack.push(Frame {
                    nodes: children.into(),
                    pending: VecDeque::new(),
                });
            }
        }
    }
}

/// Invoke `generator` on every node of the subtree rooted at each of `roots`
/// in pre-order, flattening the per-node results into one lazy sequence.
pub fn find_all<'f, N, F>(roots: &[N], generator: &'f F) -> FindAll<'f, N, F>
where
    N: AstNode,
    F: Fn(&N) -> Vec<N>,
{
    FindAll::new(roots, generator)
}

/// Compile `pattern` anchored at the start of the candidate string, matching
/// Python's `re.match` semantics (a prefix match, not a full-string match).
fn anchored(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{pattern})")).map_err(|e| {
        Error::new(ErrorKind::Unexpected, e.to_string())
            .with_operation("find_kind")
            .with_context("pattern", pattern.to_string())
    })
}

/// Yield every node under `root` whose `kind()` matches `pattern`, anchored
/// at the start.
pub fn find_kind<N: AstNode>(root: &N, pattern: &str) -> Result<impl Iterator<Item = N>> {
    let regex = anchored(pattern)?;
    let roots = std::slice::from_ref(root);
    Ok(find_all(roots, &move |node: &N| {
        if regex.is_match(node.kind()) {
            vec![node.clone()]
        } else {
            Vec::new()
        }
    })
    .collect::<Vec<_>>()
    .into_iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::TreeNode;

    #[test]
    fn find_all_visits_every_node_in_preorder() {
        let root = TreeNode::build(
            "root",
            vec![
                TreeNode::build("a", vec![TreeNode::leaf("a1"), TreeNode::leaf("a2")]),
                TreeNode::leaf("b"),
            ],
        );
        let visited: Vec<String> = find_all(std::slice::from_ref(&root), &|n: &TreeNode| {
            vec![n.clone()]
        })
        .map(|n| n.kind().to_string())
        .collect();
        assert_eq!(visited, vec!["root", "a", "a1", "a2", "b"]);
    }

    #[test]
    fn find_kind_is_anchored_at_start() {
        let root = TreeNode::build(
            "root",
            vec![TreeNode::leaf("binary_expression"), TreeNode::leaf("identifier")],
        );
        let matches: Vec<String> = find_kind(&root, "binary_.*")
            .unwrap()
            .map(|n| n.kind().to_string())
            .collect();
        assert_eq!(matches, vec!["binary_expression"]);
    }

    #[test]
    fn find_kind_dot_star_matches_every_node() {
        let root = TreeNode::build("root", vec![TreeNode::leaf("a"), TreeNode::leaf("b")]);
        let all: Vec<String> = find_all(std::slice::from_ref(&root), &|n: &TreeNode| {
            vec![n.clone()]
        })
        .map(|n| n.kind().to_string())
        .collect();
        let found: Vec<String> = find_kind(&root, ".*")
            .unwrap()
            .map(|n| n.kind().to_string())
            .collect();
        assert_eq!(all, found);
    }
}
