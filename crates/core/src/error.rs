//! Error types for kindstore
//!
//! Every failure surfaced to a caller falls into one of three application
//! categories: bad request, need-index, or internal. We use `thiserror`
//! for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

use crate::key::KeyError;
use crate::limits::LimitError;

/// Result type alias for kindstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for kindstore
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The request is malformed or exceeds a ceiling
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The query needs a composite index that does not exist
    #[error("Index required: {0}")]
    NeedIndex(String),

    /// A key or encoded document identifier could not be encoded/decoded
    #[error("Malformed key: {0}")]
    MalformedKey(#[from] KeyError),

    /// A programming-contract violation (unreachable operator or type branch)
    #[error("Internal error: {0}")]
    Internal(String),

    /// The underlying document store failed
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Application error category reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed request, unknown cursor, ceiling exceeded
    BadRequest,
    /// A composite index is required
    NeedIndex,
    /// Invariant violation or store failure
    Internal,
}

impl Error {
    /// Build a `BadRequest` error
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Error::BadRequest(reason.into())
    }

    /// Build a `NeedIndex` error
    pub fn need_index(reason: impl Into<String>) -> Self {
        Error::NeedIndex(reason.into())
    }

    /// Build an `Internal` error
    pub fn internal(reason: impl Into<String>) -> Self {
        Error::Internal(reason.into())
    }

    /// Build a `Storage` error
    pub fn storage(reason: impl Into<String>) -> Self {
        Error::Storage(reason.into())
    }

    /// The category this error is reported under
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::BadRequest(_) | Error::MalformedKey(_) => ErrorCategory::BadRequest,
            Error::NeedIndex(_) => ErrorCategory::NeedIndex,
            Error::Internal(_) | Error::Storage(_) => ErrorCategory::Internal,
        }
    }
}

impl From<LimitError> for Error {
    fn from(e: LimitError) -> Self {
        Error::BadRequest(e.to_string())
    }
}
