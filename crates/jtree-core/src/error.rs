//! Error types for casting, narrowing, access, pointer parsing, and traversal.

use crate::pointer::{AccessorKind, Pointer};
use crate::value::Representation;
use thiserror::Error;

/// The untyped input had a shape that no JSON variant can hold.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CastError {
    /// Carries the name of the offending runtime shape.
    #[error("unsupported type {0}")]
    Unsupported(String),
}

/// A narrowing conversion was attempted on the wrong variant.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("not {expected}, but {actual}")]
pub struct AsValueError {
    pub expected: Representation,
    pub actual: Representation,
}

/// Structural navigation failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The accessor cannot be applied to this variant.
    #[error("{accessor} access only allowed on {expected}, got {actual}")]
    Mismatch {
        accessor: AccessorKind,
        expected: Representation,
        actual: Representation,
    },

    #[error("key {key:?} not found in object")]
    KeyNotFound { key: String },

    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Either bound exceeds the length, or `start > end`.
    #[error("slice {start}..{end} out of bounds for array of length {len}")]
    SliceOutOfBounds { start: usize, end: usize, len: usize },
}

/// A pointer string is not valid RFC 6901 text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("pointer must start with '/', got {0:?}")]
    MissingLeadingSlash(String),

    /// `~` must be followed by `0` or `1`.
    #[error("invalid escape sequence in pointer token {token:?}")]
    InvalidEscape { token: String },
}

/// A visitor hook failed. Carries the pointer of the node being visited.
#[derive(Error, Debug)]
#[error("traversal aborted at {pointer}: {source}")]
pub struct TraversalError<E> {
    pub pointer: Pointer,
    #[source]
    pub source: E,
}

impl<E> TraversalError<E> {
    /// Drop the location and keep the visitor's own error.
    pub fn into_source(self) -> E {
        self.source
    }
}

/// Errors that can occur anywhere in jtree-core.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed JSON text, or a decoded tree that could not be cast.
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Cast(#[from] CastError),

    #[error(transparent)]
    AsValue(#[from] AsValueError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Pointer(#[from] PointerError),
}

/// Convenience alias used throughout jtree-core.
pub type Result<T> = std::result::Result<T, Error>;
