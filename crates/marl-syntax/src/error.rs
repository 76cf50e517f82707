//! Error type and utilities shared by the Marl toolchain.
//!
//! Every fallible operation in the scanner, the reader and the surrounding
//! tools returns the same flat error value: a human-readable message plus an
//! optional source span. Errors are reported by return value — there is no
//! panicking control flow — and the first failure short-circuits the whole
//! call chain back to the caller.
//!
//! ```rust
//! use marl_syntax::error::{Error, Result, error};
//!
//! fn parse_count(s: &str) -> Result<u32> {
//!     s.parse().map_err(|_| Error::new(format!("invalid count: {}", s)))
//! }
//!
//! fn checked(s: &str) -> Result<u32> {
//!     let n = parse_count(s)?;
//!     if n == 0 {
//!         return error("count must be positive");
//!     }
//!     Ok(n)
//! }
//! ```

use std::fmt;

use crate::token::Span;

/// A diagnostic produced by the scanner, the reader, or the tools on top.
///
/// Engine errors always carry the span of the offending source range; the
/// span is optional only for surrounding-tool failures (file I/O and the
/// like) that have no location in a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// Human-readable message
    pub msg: String,

    /// Source range the diagnostic points at, when one exists
    pub span: Option<Span>,
}

impl Error {
    /// Create an error without location information.
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into(), span: None }
    }

    /// Create an error pointing at a range of the source.
    pub fn with_span(msg: impl Into<String>, span: Span) -> Self {
        Self { msg: msg.into(), span: Some(span) }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => write!(f, "{} at {}", self.msg, span.from),
            None => write!(f, "{}", self.msg),
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::new(s)
    }
}
impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::new(s)
    }
}

/// A specialized `Result` using [`Error`], shared across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for `Err(Error::new(msg))`.
pub fn error<T>(msg: impl Into<String>) -> Result<T> {
    Err(Error::new(msg))
}

/// Shorthand for `Err(Error::with_span(msg, span))`.
pub fn error_at<T>(span: Span, msg: impl Into<String>) -> Result<T> {
    Err(Error::with_span(msg, span))
}
