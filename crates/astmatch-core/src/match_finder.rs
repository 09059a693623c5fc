//! The match finder (component F): aligns one or more candidate pattern
//! sequences against a source AST's sibling sequence, backtracking over
//! multi-wildcards and recursing into each concretely-matched node's
//! children.

use crate::ast::AstNode;
use crate::pattern_match::{is_multi_wildcard, is_single_wildcard, PatternMatch, EXACT_MATCH};

/// Try to align `patterns` against `src`, starting from `state`.
///
/// Returns every alignment that consumes all of `patterns` (trailing,
/// unconsumed `src` siblings are not a failure — a pattern need not name
/// every sibling, only the ones up to its last element). Each result pairs
/// the resulting state with how many leading elements of `src` it consumed;
/// the caller uses that count to know how far a sibling-position search can
/// safely skip ahead.
///
/// Multi-wildcard resolution is lazy: closing the binding at zero length is
/// tried before extending it, so `$$a` only grows as far as it has to for
/// the rest of the pattern to succeed.
fn match_siblings<N: AstNode>(
    patterns: &[N],
    src: &[N],
    state: PatternMatch<N>,
) -> Vec<(PatternMatch<N>, usize)> {
    let Some((pattern, rest_patterns)) = patterns.split_first() else {
        return vec![(state, 0)];
    };

    let name = pattern.name();

    if is_multi_wildcard(name) {
        // Register the binding (possibly empty) before attempting anything
        // else, so a multi-wildcard that ends up matching zero nodes still
        // gets a `KeyMatch` entry instead of being silently absent.
        let mut state = state;
        state.query_create(name);

        // Close at zero length first (lazy), then grow the binding by one
        // node at a time until the rest of the pattern succeeds.
        let closed = match_siblings(rest_patterns, src, state.clone());
        if !closed.is_empty() {
            return closed;
        }
        let Some((head, rest_src)) = src.split_first() else {
            return Vec::new();
        };
        let mut extended = state;
        extended.query_create(name).nodes.push(head.clone());
        extended.add_evaluated_node(head.clone());
        return match_siblings(patterns, rest_src, extended)
            .into_iter()
            .map(|(s, c)| (s, 1 + c))
            .collect();
    }

    let Some((node, rest_src)) = src.split_first() else {
        return Vec::new();
    };

    if is_single_wildcard(name) {
        let pattern_children = pattern.children();
        if !pattern_children.is_empty() && node.kind() != pattern.kind() {
            return Vec::new();
        }
        let mut branch = state;
        branch.query_create(name).nodes.push(node.clone());
        branch.add_evaluated_node(node.clone());
        if !pattern_children.is_empty() {
            let node_children = node.children();
            branch = match match_siblings(&pattern_children, &node_children, branch)
                .into_iter()
                .next()
            {
                Some((matched, _)) => matched,
                None => return Vec::new(),
            };
        }
        return match_siblings(rest_patterns, rest_src, branch)
            .into_iter()
            .map(|(s, c)| (s, 1 + c))
            .collect();
    }

    match match_node(pattern, node, state) {
        Some(branch) => match_siblings(rest_patterns, rest_src, branch)
            .into_iter()
            .map(|(s, c)| (s, 1 + c))
            .collect(),
        None => Vec::new(),
    }
}

/// Match one concrete (non-wildcard) pattern node against one source node:
/// same kind and properties at this level, and the pattern's children align
/// fully against the node's children.
fn match_node<N: AstNode>(pattern: &N, node: &N, state: PatternMatch<N>) -> Option<PatternMatch<N>> {
    if !node.is_matching(pattern) {
        return None;
    }
    let pattern_children = pattern.children();
    let node_children = node.children();
    let (mut branch, _consumed) = match_siblings(&pattern_children, &node_children, state)
        .into_iter()
        .next()?;
    branch.query_create(EXACT_MATCH).nodes.push(node.clone());
    branch.add_evaluated_node(node.clone());
    Some(branch)
}

/// One or more candidate pattern sequences, searched in priority order: at
/// each starting position the first pattern sequence to produce a valid
/// match wins, and later ones in the list are not tried there.
pub struct MatchFinder<N> {
    patterns_list: Vec<Vec<N>>,
}

/// Owning iterator over the matches produced by [`MatchFinder::find_all`].
///
/// Built eagerly (the recursive descent into every subtree is collected up
/// front) rather than lazily — a minor simplification since pattern result
/// sets are typically small and consumed in full by the caller.
pub struct PatternMatches<N>(std::vec::IntoIter<PatternMatch<N>>);

impl<N> Iterator for PatternMatches<N> {
    type Item = PatternMatch<N>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

impl<N: AstNode> MatchFinder<N> {
    pub fn new(patterns_list: Vec<Vec<N>>) -> Self {
        Self { patterns_list }
    }

    /// Convenience constructor for the common case of a single pattern
    /// sequence.
    pub fn single(pattern: Vec<N>) -> Self {
        Self::new(vec![pattern])
    }

    /// Search `src_nodes` for every non-overlapping alignment of any
    /// candidate pattern sequence, left to right. When `recursive` is true,
    /// after the sibling list is fully scanned the search descends
    /// depth-first into every node's children and repeats.
    pub fn find_all(&self, src_nodes: &[N], recursive: bool) -> PatternMatches<N> {
        let mut out = Vec::new();
        self.scan(src_nodes, recursive, &mut out);
        PatternMatches(out.into_iter())
    }

    fn scan(&self, src_nodes: &[N], recursive: bool, out: &mut Vec<PatternMatch<N>>) {
        let mut i = 0usize;
        while i < src_nodes.len() {
            let window = &src_nodes[i..];
            let mut step = 1usize;
            for patterns in &self.patterns_list {
                let state = PatternMatch::new(src_nodes.to_vec(), patterns.clone());
                let mut found = false;
                for (candidate, consumed) in match_siblings(patterns, window, state) {
                    if let Some(validated) = candidate.validate() {
                        tracing::trace!(position = i, consumed, "match_finder: accepted match");
                        out.push(validated);
                        step = consumed.max(1);
                        found = true;
                        break;
                    }
                }
                if found {
                    break;
                }
            }
            i += step;
        }
        if recursive {
            for node in src_nodes {
                self.scan(&node.children(), recursive, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::TreeNode;

    #[test]
    fn matches_if_statement_binding_condition_and_body() {
        let pattern_root = TreeNode::build(
            "if_statement",
            vec![
                TreeNode::named("wildcard", "$cond"),
                TreeNode::named("wildcard", "$then"),
            ],
        );
        let cond = TreeNode::leaf("binary_expression");
        let body = TreeNode::leaf("call_expression");
        let src_if = TreeNode::build("if_statement", vec![cond.clone(), body.clone()]);
        let other = TreeNode::leaf("return_statement");

        let finder = MatchFinder::single(vec![pattern_root]);
        let matches: Vec<_> = finder.find_all(&[src_if, other], false).collect();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].single("$cond"), Some(&cond));
        assert_eq!(matches[0].single("$then"), Some(&body));
    }

    #[test]
    fn multi_wildcard_binds_every_argument() {
        let pattern_root = TreeNode::build(
            "call_expression",
            vec![TreeNode::named("multi_wildcard", "$$args")],
        );
        let args = vec![
            TreeNode::leaf("identifier"),
            TreeNode::leaf("number_literal"),
            TreeNode::leaf("identifier"),
        ];
        let call = TreeNode::build("call_expression", args.clone());

        let finder = MatchFinder::single(vec![pattern_root]);
        let matches: Vec<_> = finder.find_all(&[call], false).collect();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].multiple("$$args"), args.as_slice());
    }

    #[test]
    fn trailing_multi_wildcard_with_no_extra_arguments_binds_an_empty_list() {
        let pattern_root = TreeNode::build(
            "call_expression",
            vec![
                TreeNode::named("wildcard", "$a"),
                TreeNode::named("multi_wildcard", "$$rest"),
            ],
        );
        let only_arg = TreeNode::leaf("identifier");
        let call = TreeNode::build("call_expression", vec![only_arg.clone()]);

        let finder = MatchFinder::single(vec![pattern_root]);
        let matches: Vec<_> = finder.find_all(&[call], false).collect();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].single("$a"), Some(&only_arg));
        assert!(matches[0].key_matches().iter().any(|km| km.key == "$$rest"));
        assert_eq!(matches[0].multiple("$$rest"), &[] as &[TreeNode]);
    }

    #[test]
    fn non_matching_kind_yields_no_match() {
        let pattern_root = TreeNode::build("return_statement", vec![]);
        let src = vec![TreeNode::leaf("if_statement"), TreeNode::leaf("break_statement")];

        let finder = MatchFinder::single(vec![pattern_root]);
        assert_eq!(finder.find_all(&src, false).count(), 0);
    }

    #[test]
    fn duplicate_placeholder_requires_structurally_equal_bindings() {
        let pattern_root = TreeNode::build(
            "binary_expression",
            vec![TreeNode::named("wildcard", "$x"), TreeNode::named("wildcard", "$x")],
        );
        let consistent = TreeNode::build(
            "binary_expression",
            vec![TreeNode::leaf("identifier"), TreeNode::leaf("identifier")],
        );
        let inconsistent = TreeNode::build(
            "binary_expression",
            vec![TreeNode::leaf("identifier"), TreeNode::leaf("number_literal")],
        );

        let finder = MatchFinder::single(vec![pattern_root]);
        assert_eq!(finder.find_all(&[consistent], false).count(), 1);
        assert_eq!(finder.find_all(&[inconsistent], false).count(), 0);
    }

    #[test]
    fn recursive_search_descends_into_nested_blocks() {
        let pattern_root = TreeNode::build("return_statement", vec![TreeNode::named("wildcard", "$value")]);
        let inner_return = TreeNode::build("return_statement", vec![TreeNode::leaf("number_literal")]);
        let inner_block = TreeNode::build("compound_statement", vec![inner_return]);
        let function = TreeNode::build("function_definition", vec![inner_block]);

        let finder = MatchFinder::single(vec![pattern_root]);
        let matches: Vec<_> = finder.find_all(&[function], true).collect();

        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn non_recursive_search_ignores_nested_blocks() {
        let pattern_root = TreeNode::build("return_statement", vec![TreeNode::named("wildcard", "$value")]);
        let inner_return = TreeNode::build("return_statement", vec![TreeNode::leaf("number_literal")]);
        let inner_block = TreeNode::build("compound_statement", vec![inner_return]);
        let function = TreeNode::build("function_definition", vec![inner_block]);

        let finder = MatchFinder::single(vec![pattern_root]);
        assert_eq!(finder.find_all(&[function], false).count(), 0);
    }

    #[test]
    fn first_pattern_in_priority_order_wins() {
        let specific = TreeNode::build("if_statement", vec![TreeNode::named("wildcard", "$specific")]);
        let generic = TreeNode::build("if_statement", vec![TreeNode::named("wildcard", "$generic")]);
        let src = TreeNode::build("if_statement", vec![TreeNode::leaf("binary_expression")]);

        let finder = MatchFinder::new(vec![vec![specific], vec![generic]]);
        let matches: Vec<_> = finder.find_all(&[src], false).collect();

        assert_eq!(matches.len(), 1);
        assert!(matches[0].single("$specific").is_some());
        assert!(matches[0].single("$generic").is_none());
    }
}
