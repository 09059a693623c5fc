//! Provider-agnostic structural pattern matching over C-family ASTs.
//!
//! This crate defines the uniform node interface ([`ast::AstNode`]), the
//! traversal helpers built on top of it, the pattern-match state model, and
//! the match finder that aligns a compiled pattern sequence against a source
//! sequence. It does not know how to parse source text into a tree — that is
//! the job of a provider crate such as `astmatch-cpp`, which also supplies
//! the [`factory::AstProvider`] implementation the [`factory::Factory`]
//! façade is generic over.

pub mod ast;
pub mod cache;
pub mod factory;
pub mod match_finder;
pub mod pattern_match;
pub mod shower;
pub mod traverse;

#[cfg(test)]
mod testutil;

pub use ast::{AstNode, PropertyMap, PropertyValue, VisitorResult};
pub use cache::ContentCache;
pub use factory::{AstProvider, Factory};
pub use match_finder::{MatchFinder, PatternMatches};
pub use pattern_match::{is_multi_wildcard, is_single_wildcard, is_wildcard, KeyMatch, PatternMatch, EXACT_MATCH};
pub use shower::Shower;
pub use traverse::{find_all, find_kind, FindAll};
