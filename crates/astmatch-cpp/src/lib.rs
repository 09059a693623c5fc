//! `tree-sitter-cpp`-backed AST provider and pattern factory.
//!
//! This crate is the one concrete, production-usable collaborator for
//! `astmatch-core`'s provider-agnostic matching engine: it parses real C++
//! source with `tree-sitter-cpp` and compiles pattern fragments into
//! pattern subtrees by splicing them into a minimal stub and letting the
//! same parser build the tree.

mod node;
mod pattern_factory;
mod properties;
mod provider;

pub use node::CppNode;
pub use pattern_factory::PatternFactory;
pub use provider::CppProvider;
