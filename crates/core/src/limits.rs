//! Query shape limits
//!
//! Ceilings that are checked before a query touches the store. Violations
//! are reported as bad requests.

use thiserror::Error;

use crate::query::QueryDescriptor;

/// Default maximum query offset
pub const MAX_QUERY_OFFSET: u64 = 1000;

/// Default maximum of filters + orders + ancestor
pub const MAX_QUERY_COMPONENTS: usize = 100;

/// Ceilings on query shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryLimits {
    /// Maximum offset (default: 1000)
    pub max_query_offset: u64,

    /// Maximum filters + orders + ancestor (default: 100)
    pub max_query_components: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        QueryLimits {
            max_query_offset: MAX_QUERY_OFFSET,
            max_query_components: MAX_QUERY_COMPONENTS,
        }
    }
}

impl QueryLimits {
    /// Check a query against every ceiling
    pub fn validate(&self, query: &QueryDescriptor) -> Result<(), LimitError> {
        if let Some(offset) = query.offset {
            if offset > self.max_query_offset {
                return Err(LimitError::OffsetTooLarge {
                    actual: offset,
                    max: self.max_query_offset,
                });
            }
        }

        let components = query.component_count();
        if components > self.max_query_components {
            return Err(LimitError::TooManyComponents {
                actual: components,
                max: self.max_query_components,
            });
        }

        Ok(())
    }
}

/// Query limit violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LimitError {
    /// Offset above the ceiling
    #[error("Too big query offset: {actual} exceeds maximum {max}")]
    OffsetTooLarge {
        /// Requested offset
        actual: u64,
        /// Ceiling
        max: u64,
    },

    /// Too many filters + sort orders + ancestor
    #[error(
        "query is too large: {actual} components, may not have more than {max} filters + sort orders + ancestor total"
    )]
    TooManyComponents {
        /// Component count
        actual: usize,
        /// Ceiling
        max: usize,
    },
}

impl LimitError {
    /// Get the reason code for the wire surface
    pub fn reason_code(&self) -> &'static str {
        match self {
            LimitError::OffsetTooLarge { .. } => "offset_too_large",
            LimitError::TooManyComponents { .. } => "query_too_large",
        }
    }
}
