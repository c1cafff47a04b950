//! Typed property values of the datastore model
//!
//! `PropertyValue` is a closed set of logical types. Several of them have no
//! native counterpart in the document store (ratings, categories, geo points,
//! users...) and are tagged by the value codec so that they decode back to
//! the same logical type.
//!
//! Two types are unorderable: long `Text` and `Blob`. Sorting or
//! range-filtering on a property holding either yields no results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Key;

/// A geographical point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPt {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

impl GeoPt {
    /// Create a geo point
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Logical property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Absent value
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit float
    Float(f64),
    /// Short indexed string
    String(String),
    /// Raw bytes (unorderable)
    Blob(Vec<u8>),
    /// Long text (unorderable)
    Text(String),
    /// User rating, 0 to 100
    Rating(i64),
    /// Category label
    Category(String),
    /// Email address
    Email(String),
    /// URL
    Link(String),
    /// User principal
    User {
        /// Account email
        email: String,
    },
    /// Instant messaging handle
    Im {
        /// Protocol (URL or well-known name)
        protocol: String,
        /// Address on that protocol
        address: String,
    },
    /// Geographical point
    GeoPt(GeoPt),
    /// UTC instant with microsecond precision
    DateTime(DateTime<Utc>),
    /// Reference to another entity
    Key(Key),
    /// Multi-valued property
    List(Vec<PropertyValue>),
}

/// Discriminant of [`PropertyValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    /// See [`PropertyValue::Null`]
    Null,
    /// See [`PropertyValue::Bool`]
    Bool,
    /// See [`PropertyValue::Int`]
    Int,
    /// See [`PropertyValue::Float`]
    Float,
    /// See [`PropertyValue::String`]
    String,
    /// See [`PropertyValue::Blob`]
    Blob,
    /// See [`PropertyValue::Text`]
    Text,
    /// See [`PropertyValue::Rating`]
    Rating,
    /// See [`PropertyValue::Category`]
    Category,
    /// See [`PropertyValue::Email`]
    Email,
    /// See [`PropertyValue::Link`]
    Link,
    /// See [`PropertyValue::User`]
    User,
    /// See [`PropertyValue::Im`]
    Im,
    /// See [`PropertyValue::GeoPt`]
    GeoPt,
    /// See [`PropertyValue::DateTime`]
    DateTime,
    /// See [`PropertyValue::Key`]
    Key,
    /// See [`PropertyValue::List`]
    List,
}

impl PropertyType {
    /// Whether values of this type can be sorted or range-filtered
    pub fn is_orderable(self) -> bool {
        !matches!(self, PropertyType::Text | PropertyType::Blob)
    }

    /// Get the type name as a string
    pub fn name(self) -> &'static str {
        match self {
            PropertyType::Null => "Null",
            PropertyType::Bool => "Bool",
            PropertyType::Int => "Int",
            PropertyType::Float => "Float",
            PropertyType::String => "String",
            PropertyType::Blob => "Blob",
            PropertyType::Text => "Text",
            PropertyType::Rating => "Rating",
            PropertyType::Category => "Category",
            PropertyType::Email => "Email",
            PropertyType::Link => "Link",
            PropertyType::User => "User",
            PropertyType::Im => "Im",
            PropertyType::GeoPt => "GeoPt",
            PropertyType::DateTime => "DateTime",
            PropertyType::Key => "Key",
            PropertyType::List => "List",
        }
    }
}

impl PropertyValue {
    /// Logical type of this value
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::Null => PropertyType::Null,
            PropertyValue::Bool(_) => PropertyType::Bool,
            PropertyValue::Int(_) => PropertyType::Int,
            PropertyValue::Float(_) => PropertyType::Float,
            PropertyValue::String(_) => PropertyType::String,
            PropertyValue::Blob(_) => PropertyType::Blob,
            PropertyValue::Text(_) => PropertyType::Text,
            PropertyValue::Rating(_) => PropertyType::Rating,
            PropertyValue::Category(_) => PropertyType::Category,
            PropertyValue::Email(_) => PropertyType::Email,
            PropertyValue::Link(_) => PropertyType::Link,
            PropertyValue::User { .. } => PropertyType::User,
            PropertyValue::Im { .. } => PropertyType::Im,
            PropertyValue::GeoPt(_) => PropertyType::GeoPt,
            PropertyValue::DateTime(_) => PropertyType::DateTime,
            PropertyValue::Key(_) => PropertyType::Key,
            PropertyValue::List(_) => PropertyType::List,
        }
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        self.property_type().name()
    }

    /// Get as &Key if this is a Key value
    pub fn as_key(&self) -> Option<&Key> {
        match self {
            PropertyValue::Key(k) => Some(k),
            _ => None,
        }
    }

    /// Get as a slice if this is a List value
    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::List(items) => Some(items),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Int(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Int(i as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<Key> for PropertyValue {
    fn from(k: Key) -> Self {
        PropertyValue::Key(k)
    }
}

impl From<GeoPt> for PropertyValue {
    fn from(p: GeoPt) -> Self {
        PropertyValue::GeoPt(p)
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(t: DateTime<Utc>) -> Self {
        PropertyValue::DateTime(t)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(items: Vec<PropertyValue>) -> Self {
        PropertyValue::List(items)
    }
}
