//! Key component validation for kindstore
//!
//! Keys are encoded into flat document identifiers by joining their path
//! components with [`FIELD_SEPARATOR`]; numeric ids are prefixed with
//! [`ID_MARKER`]. For that encoding to be total and unambiguous every
//! component must obey these rules:
//!
//! - Kinds and names must not be empty
//! - Kinds and names must not contain the field separator (`\x08`)
//! - Names must not start with the id marker (`\t`)
//! - The last path element must have an identifier before it is encoded

use thiserror::Error;

/// Byte separating the fields of an encoded key
pub const FIELD_SEPARATOR: char = '\u{8}';

/// Byte prefixing a numeric id inside an encoded key
pub const ID_MARKER: char = '\t';

/// Validate a kind name
pub fn validate_kind(kind: &str) -> Result<(), KeyError> {
    if kind.is_empty() {
        return Err(KeyError::EmptyKind);
    }
    if kind.contains(FIELD_SEPARATOR) {
        return Err(KeyError::ContainsSeparator {
            component: kind.to_string(),
        });
    }
    Ok(())
}

/// Validate a caller-assigned name
pub fn validate_name(name: &str) -> Result<(), KeyError> {
    if name.is_empty() {
        return Err(KeyError::EmptyName);
    }
    if name.contains(FIELD_SEPARATOR) {
        return Err(KeyError::ContainsSeparator {
            component: name.to_string(),
        });
    }
    if name.starts_with(ID_MARKER) {
        return Err(KeyError::MarkerPrefix {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Key validation and decoding errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    /// Key has no path elements
    #[error("key path is empty")]
    EmptyPath,

    /// A path element has an empty kind
    #[error("kind cannot be empty")]
    EmptyKind,

    /// A path element has an empty name
    #[error("name cannot be empty")]
    EmptyName,

    /// A component contains the field separator
    #[error("component {component:?} contains the field separator")]
    ContainsSeparator {
        /// Offending component
        component: String,
    },

    /// A name starts with the numeric id marker
    #[error("name {name:?} starts with the id marker")]
    MarkerPrefix {
        /// Offending name
        name: String,
    },

    /// A path element has neither a name nor an id
    #[error("path element of kind {kind:?} has no identifier")]
    Incomplete {
        /// Kind of the incomplete element
        kind: String,
    },

    /// An encoded identifier has an odd or zero number of fields
    #[error("encoded key has {count} fields, expected a positive even number")]
    FieldCount {
        /// Number of fields found
        count: usize,
    },

    /// An encoded numeric id failed to parse
    #[error("invalid numeric id {raw:?}")]
    InvalidId {
        /// The raw field text after the marker
        raw: String,
    },
}

impl KeyError {
    /// Get the reason code for the wire surface
    pub fn reason_code(&self) -> &'static str {
        match self {
            KeyError::EmptyPath => "empty_path",
            KeyError::EmptyKind => "empty_kind",
            KeyError::EmptyName => "empty_name",
            KeyError::ContainsSeparator { .. } => "contains_separator",
            KeyError::MarkerPrefix { .. } => "marker_prefix",
            KeyError::Incomplete { .. } => "incomplete_key",
            KeyError::FieldCount { .. } => "field_count",
            KeyError::InvalidId { .. } => "invalid_id",
        }
    }
}
