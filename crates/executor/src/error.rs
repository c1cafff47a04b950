//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Categorized**: Each maps to bad request, need-index or internal

use serde::{Deserialize, Serialize};

use kindstore_core::ErrorCategory;

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Bad request | `InvalidKey`, `BadRequest` | Malformed request or ceiling exceeded |
/// | Need index | `NeedIndex` | Composite index missing |
/// | Internal | `Storage`, `Internal` | Store failure or invariant violation |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Bad Request ====================
    /// Key cannot be encoded or decoded
    #[error("invalid key: {reason}")]
    InvalidKey { reason: String, code: String },

    /// Malformed request, unknown cursor, or query ceiling exceeded
    #[error("bad request: {reason}")]
    BadRequest { reason: String },

    // ==================== Need Index ====================
    /// The query needs a composite index that does not exist
    #[error("need index: {reason}")]
    NeedIndex { reason: String },

    // ==================== Internal ====================
    /// Underlying document store failure
    #[error("storage error: {reason}")]
    Storage { reason: String },

    /// Internal error (bug or invariant violation)
    #[error("internal error: {reason}")]
    Internal { reason: String },
}

impl Error {
    /// The application category reported to the caller
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidKey { .. } | Error::BadRequest { .. } => ErrorCategory::BadRequest,
            Error::NeedIndex { .. } => ErrorCategory::NeedIndex,
            Error::Storage { .. } | Error::Internal { .. } => ErrorCategory::Internal,
        }
    }
}
