//! The match-state data model: [`KeyMatch`] and [`PatternMatch`], plus the
//! placeholder-name helpers shared by the match finder.

use std::collections::HashMap;

use crate::ast::AstNode;

/// Reserved key under which every concretely-matched (non-wildcard) node is
/// recorded. Never usable as a placeholder name.
pub const EXACT_MATCH: &str = "EXACT_MATCH";

/// `$$name` — binds zero or more contiguous sibling nodes.
pub fn is_multi_wildcard(name: &str) -> bool {
    name.starts_with("$$")
}

/// `$name` — binds exactly one node. `$$` is checked first so multi
/// wildcards never misclassify as single.
pub fn is_single_wildcard(name: &str) -> bool {
    !is_multi_wildcard(name) && name.starts_with('$')
}

pub fn is_wildcard(name: &str) -> bool {
    is_single_wildcard(name) || is_multi_wildcard(name)
}

/// One placeholder (or `EXACT_MATCH`) binding: the key plus every node bound
/// to it so far in the current match attempt.
#[derive(Clone)]
pub struct KeyMatch<N> {
    pub key: String,
    pub nodes: Vec<N>,
}

impl<N> KeyMatch<N> {
    fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            nodes: Vec::new(),
        }
    }
}

/// State accumulated while attempting to align a pattern sequence against a
/// source sequence. Cloned whenever a tentative branch (a multi-wildcard
/// closing early, or the outer driver trying the next pattern) needs to be
/// explored independently of the current one.
#[derive(Clone)]
pub struct PatternMatch<N> {
    pub src_nodes: Vec<N>,
    pub patterns: Vec<N>,
    key_matches: Vec<KeyMatch<N>>,
    evaluated_nodes: Vec<N>,
}

impl<N: AstNode> PatternMatch<N> {
    pub fn new(src_nodes: Vec<N>, patterns: Vec<N>) -> Self {
        Self {
            src_nodes,
            patterns,
            key_matches: Vec::new(),
            evaluated_nodes: Vec::new(),
        }
    }

    /// Return the last `KeyMatch` for `key` if it is also the most recently
    /// added entry overall, otherwise start a fresh one. This is what lets
    /// consecutive bindings of the same placeholder collapse into one
    /// ordered node list, while non-consecutive occurrences (a wildcard
    /// reused after other keys were bound in between) stay distinct for the
    /// consistency check in [`Self::validate`].
    pub fn query_create(&mut self, key: &str) -> &mut KeyMatch<N> {
        let reuse_last = matches!(self.key_matches.last(), Some(last) if last.key == key);
        if !reuse_last {
            self.key_matches.push(KeyMatch::new(key));
        }
        self.key_matches.last_mut().expect("just pushed or present")
    }

    pub fn evaluated_nodes(&self) -> &[N] {
        &self.evaluated_nodes
    }

    pub fn add_evaluated_node(&mut self, node: N) {
        self.evaluated_nodes.push(node);
    }

    pub fn key_matches(&self) -> &[KeyMatch<N>] {
        &self.key_matches
    }

    /// Convenience view: key -> bound nodes. When the same key occurs in
    /// more than one non-contiguous `KeyMatch`, the last occurrence wins,
    /// matching the behaviour of building a `dict` from an ordered list of
    /// (key, value) pairs.
    pub fn as_dict(&self) -> HashMap<String, Vec<N>> {
        let mut dict = HashMap::new();
        for key_match in &self.key_matches {
            dict.insert(key_match.key.clone(), key_match.nodes.clone());
        }
        dict
    }

    /// Get the single node bound to placeholder `key`, if any.
    pub fn single(&self, key: &str) -> Option<&N> {
        self.key_matches
            .iter()
            .rev()
            .find(|km| km.key == key)
            .and_then(|km| km.nodes.first())
    }

    /// Get the (possibly empty) slice of nodes bound to multi-placeholder
    /// `key`.
    pub fn multiple(&self, key: &str) -> &[N] {
        self.key_matches
            .iter()
            .rev()
            .find(|km| km.key == key)
            .map(|km| km.nodes.as_slice())
            .unwrap_or(&[])
    }

    /// Run all three validation passes (§4.F.3). Consumes and returns `self`
    /// so a failed validation simply drops the state.
    pub fn validate(mut self) -> Option<Self> {
        self.elide_parents();
        if !self.single_cardinality_holds() {
            return None;
        }
        if !self.duplicate_keys_are_consistent() {
            return None;
        }
        Some(self)
    }

    /// Drop any node from a `KeyMatch` whose parent is also present in the
    /// same `KeyMatch`: prevents a wildcard from over-counting both a node
    /// and its ancestor when it captured both during descent.
    fn elide_parents(&mut self) {
        for key_match in &mut self.key_matches {
            let siblings = key_match.nodes.clone();
            key_match.nodes.retain(|node| match node.parent() {
                Some(parent) => !siblings.iter().any(|n| *n == parent),
                None => true,
            });
        }
    }

    fn single_cardinality_holds(&self) -> bool {
        self.key_matches
            .iter()
            .filter(|km| is_single_wildcard(&km.key))
            .all(|km| km.nodes.len() == 1)
    }

    /// For every key that appears in more than one `KeyMatch`, require that
    /// the nodes line up pairwise (by occurrence index) as structurally
    /// equal to the first occurrence's nodes.
    fn duplicate_keys_are_consistent(&self) -> bool {
        let mut groups: HashMap<&str, Vec<&Vec<N>>> = HashMap::new();
        for key_match in &self.key_matches {
            groups.entry(&key_match.key).or_default().push(&key_match.nodes);
        }
        for (_, occurrences) in groups.into_iter().filter(|(_, occ)| occ.len() > 1) {
            let first = occurrences[0];
            for other in &occurrences[1..] {
                if other.len() != first.len() {
                    return false;
                }
                for (a, b) in first.iter().zip(other.iter()) {
                    if !a.is_matching(b) {
                        return false;
                    }
                }
            }
        }
        true
    }
}
