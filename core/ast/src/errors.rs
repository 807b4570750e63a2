//! Error types for the AST crate.
//!
//! Tree construction and traversal are infallible; errors come from the
//! checked builder entry points and from writing printed source to a sink.

use thiserror::Error;

use crate::nodes::Tag;

/// Errors raised by checked tree construction.
#[derive(Debug, Error, PartialEq, Eq)]
#[must_use = "errors must not be silently ignored"]
pub enum AstError {
    /// A unary, binary or compound-assignment node was requested with a tag
    /// that is not an operator of that arity.
    #[error("{tag:?} is not a {expected} operator")]
    NotAnOperator { tag: Tag, expected: &'static str },

    /// A dotted name had an empty segment.
    #[error("invalid qualified name `{name}`")]
    InvalidQualifiedName { name: String },
}

/// Errors raised while pretty-printing.
#[derive(Debug, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum PrettyError {
    /// The output sink failed.
    #[error("failed to write printed tree: {0}")]
    Io(#[from] std::io::Error),

    /// A buffered rendering was not valid UTF-8.
    #[error("printed tree is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
