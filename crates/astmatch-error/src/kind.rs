//! Error kinds for astmatch operations.

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Matches on `ErrorKind` let callers decide how to react without parsing
/// message strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Catch-all for unhandled cases.
    Unexpected,

    /// The underlying parser could not parse a stub or source file.
    ParseFailed,

    /// The content cache or factory could not read a file from disk.
    IoFailed,

    /// Source or pattern text was not valid UTF-8.
    EncodingError,

    /// A caller asked for a single declaration/statement but the fragment
    /// produced zero or more than one top-level item.
    Misuse,
}

impl ErrorKind {
    /// Whether errors of this kind are worth retrying.
    ///
    /// Parse and misuse errors will not resolve themselves; only I/O has any
    /// chance of succeeding on a second attempt (e.g. a transient file lock).
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::IoFailed)
    }
}
