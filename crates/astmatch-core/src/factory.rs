//! Factory façade (component H): the provider-agnostic surface for turning
//! a file path or literal source text into a root [`AstNode`].
//!
//! `astmatch-core` never parses anything itself; it only describes the
//! contract a provider must satisfy ([`AstProvider`]) and wraps it in a
//! thin façade so callers don't need to name the provider type at every
//! call site.

use std::path::Path;

use astmatch_error::Result;

use crate::ast::AstNode;

/// Contract a concrete parser back-end (e.g. `astmatch-cpp`) must satisfy.
pub trait AstProvider {
    /// Root node type this provider produces.
    type Node: AstNode;

    /// Parse the file at `path` and return its translation-unit root.
    fn load(&self, path: &Path) -> Result<Self::Node>;

    /// Parse `content` as if it were the file `logical_name`, without
    /// touching the filesystem. The content cache is pre-seeded with
    /// `content` so later `raw_signature()` calls never read from disk.
    fn load_from_text(&self, content: &str, logical_name: &str) -> Result<Self::Node>;
}

/// Thin, provider-generic façade over [`AstProvider`].
pub struct Factory<P: AstProvider> {
    provider: P,
}

impl<P: AstProvider> Factory<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn create(&self, path: impl AsRef<Path>) -> Result<P::Node> {
        self.provider.load(path.as_ref())
    }

    pub fn create_from_text(&self, text: &str, logical_name: &str) -> Result<P::Node> {
        self.provider.load_from_text(text, logical_name)
    }
}
