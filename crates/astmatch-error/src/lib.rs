//! # astmatch-error
//!
//! Unified error handling for astmatch.
//!
//! ## Design philosophy
//!
//! - **ErrorKind**: know what went wrong (`ParseFailed`, `IoFailed`, `Misuse`, ...)
//! - **ErrorStatus**: decide whether retrying makes sense
//! - **Context**: attach key/value pairs to help locate the cause
//! - **Source**: wrap the underlying error without leaking its raw type everywhere
//!
//! ## Usage
//!
//! ```rust
//! use astmatch_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::ParseFailed, "unexpected token")
//!         .with_operation("pattern_factory::create_expression")
//!         .with_context("fragment", "a == $x"))
//! }
//! ```

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using the astmatch `Error`.
pub type Result<T> = std::result::Result<T, Error>;
