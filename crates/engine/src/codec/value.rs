//! Value codec: typed property values to native document values
//!
//! Scalars with a native counterpart pass through; blobs use native bytes.
//! Every other logical type becomes a record tagged with a `class` field:
//!
//! | Type | Record |
//! |------|--------|
//! | Rating | `{class: "rating", rating}` |
//! | Category | `{class: "category", category}` |
//! | Key | `{class: "key", path}` |
//! | List | `{class: "list", list, ascending_sort_key, descending_sort_key}` |
//! | User | `{class: "user", email}` |
//! | Text | `{class: "text", string}` |
//! | Im | `{class: "im", protocol, address}` |
//! | GeoPt | `{class: "geopt", lat, lon}` |
//! | Email / Link | `{class: "email" / "link", value}` |
//! | DateTime | `{class: "datetime", usec, usec_nsec}` |
//!
//! A list's sort keys are the smallest and largest encoded element, so a
//! list property sorts ascending by its minimum and descending by its
//! maximum.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use kindstore_core::{Direction, Error, GeoPt, PropertyType, PropertyValue, Result, Value};

use super::key::{decode_key, encode_key};

/// Field holding the type tag of a tagged record
pub const CLASS: &str = "class";

/// Field of a list record holding the encoded elements
pub const LIST_ITEMS: &str = "list";

const ASCENDING_SORT_KEY: &str = "ascending_sort_key";
const DESCENDING_SORT_KEY: &str = "descending_sort_key";

fn tagged<const N: usize>(class: &str, fields: [(&str, Value); N]) -> Value {
    let mut record = BTreeMap::new();
    record.insert(CLASS.to_string(), Value::String(class.to_string()));
    for (name, value) in fields {
        record.insert(name.to_string(), value);
    }
    Value::Object(record)
}

/// Whole microseconds since the epoch plus the sub-microsecond remainder
fn datetime(usec: i64, nsec: i64) -> Result<DateTime<Utc>> {
    if !(0..1000).contains(&nsec) {
        return Err(Error::internal(format!("datetime remainder {}ns out of range", nsec)));
    }
    DateTime::from_timestamp_micros(usec)
        .and_then(|dt| dt.checked_add_signed(Duration::nanoseconds(nsec)))
        .ok_or_else(|| Error::internal(format!("datetime {} out of range", usec)))
}

/// Encode a property value into its native form
///
/// # Errors
///
/// Returns `MalformedKey` if a key value (or a key inside a list) cannot be
/// encoded.
pub fn to_storage(value: &PropertyValue) -> Result<Value> {
    Ok(match value {
        PropertyValue::Null => Value::Null,
        PropertyValue::Bool(b) => Value::Bool(*b),
        PropertyValue::Int(i) => Value::Int(*i),
        PropertyValue::Float(f) => Value::Float(*f),
        PropertyValue::String(s) => Value::String(s.clone()),
        PropertyValue::Blob(bytes) => Value::Bytes(bytes.clone()),
        PropertyValue::Text(s) => tagged("text", [("string", Value::String(s.clone()))]),
        PropertyValue::Rating(r) => tagged("rating", [("rating", Value::Int(*r))]),
        PropertyValue::Category(c) => tagged("category", [("category", Value::String(c.clone()))]),
        PropertyValue::Email(e) => tagged("email", [("value", Value::String(e.clone()))]),
        PropertyValue::Link(l) => tagged("link", [("value", Value::String(l.clone()))]),
        PropertyValue::User { email } => tagged("user", [("email", Value::String(email.clone()))]),
        PropertyValue::Im { protocol, address } => tagged(
            "im",
            [
                ("protocol", Value::String(protocol.clone())),
                ("address", Value::String(address.clone())),
            ],
        ),
        PropertyValue::GeoPt(pt) => tagged(
            "geopt",
            [("lat", Value::Float(pt.lat)), ("lon", Value::Float(pt.lon))],
        ),
        PropertyValue::DateTime(dt) => tagged(
            "datetime",
            [
                ("usec", Value::Int(dt.timestamp_micros())),
                ("usec_nsec", Value::Int(i64::from(dt.timestamp_subsec_nanos() % 1000))),
            ],
        ),
        PropertyValue::Key(key) => tagged("key", [("path", Value::String(encode_key(key)?))]),
        PropertyValue::List(items) => {
            let encoded = items.iter().map(to_storage).collect::<Result<Vec<_>>>()?;
            let min = encoded.iter().min_by(|a, b| a.compare(b)).cloned();
            let max = encoded.iter().max_by(|a, b| a.compare(b)).cloned();
            tagged(
                "list",
                [
                    (LIST_ITEMS, Value::Array(encoded)),
                    (ASCENDING_SORT_KEY, min.unwrap_or(Value::Null)),
                    (DESCENDING_SORT_KEY, max.unwrap_or(Value::Null)),
                ],
            )
        }
    })
}

struct Record<'a> {
    class: &'a str,
    fields: &'a BTreeMap<String, Value>,
}

impl<'a> Record<'a> {
    fn field(&self, name: &str) -> Result<&'a Value> {
        self.fields.get(name).ok_or_else(|| {
            Error::internal(format!("{} record is missing field {:?}", self.class, name))
        })
    }

    fn string(&self, name: &str) -> Result<String> {
        self.field(name)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.mistyped(name))
    }

    fn int(&self, name: &str) -> Result<i64> {
        self.field(name)?.as_int().ok_or_else(|| self.mistyped(name))
    }

    fn float(&self, name: &str) -> Result<f64> {
        self.field(name)?.as_float().ok_or_else(|| self.mistyped(name))
    }

    fn mistyped(&self, name: &str) -> Error {
        Error::internal(format!("{} record has a mistyped field {:?}", self.class, name))
    }
}

/// Decode a native value back into the property value it was encoded from
///
/// # Errors
///
/// Returns an internal error for values this codec never produces: bare
/// arrays, untagged records, unknown tags and records with missing fields.
pub fn from_storage(value: &Value) -> Result<PropertyValue> {
    let fields = match value {
        Value::Null => return Ok(PropertyValue::Null),
        Value::Bool(b) => return Ok(PropertyValue::Bool(*b)),
        Value::Int(i) => return Ok(PropertyValue::Int(*i)),
        Value::Float(f) => return Ok(PropertyValue::Float(*f)),
        Value::String(s) => return Ok(PropertyValue::String(s.clone())),
        Value::Bytes(bytes) => return Ok(PropertyValue::Blob(bytes.clone())),
        Value::Array(_) => return Err(Error::internal("untagged array in stored document")),
        Value::Object(fields) => fields,
    };

    let class = fields
        .get(CLASS)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::internal("untagged record in stored document"))?;
    let record = Record { class, fields };

    Ok(match class {
        "text" => PropertyValue::Text(record.string("string")?),
        "rating" => PropertyValue::Rating(record.int("rating")?),
        "category" => PropertyValue::Category(record.string("category")?),
        "email" => PropertyValue::Email(record.string("value")?),
        "link" => PropertyValue::Link(record.string("value")?),
        "user" => PropertyValue::User {
            email: record.string("email")?,
        },
        "im" => PropertyValue::Im {
            protocol: record.string("protocol")?,
            address: record.string("address")?,
        },
        "geopt" => PropertyValue::GeoPt(GeoPt::new(record.float("lat")?, record.float("lon")?)),
        "datetime" => {
            PropertyValue::DateTime(datetime(record.int("usec")?, record.int("usec_nsec")?)?)
        }
        "key" => PropertyValue::Key(decode_key(&record.string("path")?)?),
        "list" => {
            let items = record
                .field(LIST_ITEMS)?
                .as_array()
                .ok_or_else(|| record.mistyped(LIST_ITEMS))?;
            PropertyValue::List(items.iter().map(from_storage).collect::<Result<_>>()?)
        }
        other => return Err(Error::internal(format!("unknown value class {:?}", other))),
    })
}

/// Native sort paths for ordering a property of the given type
///
/// Returns `None` for unorderable types.
pub fn sort_paths(property: &str, ty: PropertyType, direction: Direction) -> Option<Vec<String>> {
    let sub = |fields: &[&str]| -> Vec<String> {
        fields
            .iter()
            .map(|f| format!("{}.{}", property, f))
            .collect()
    };
    Some(match ty {
        PropertyType::Text | PropertyType::Blob => return None,
        PropertyType::Null
        | PropertyType::Bool
        | PropertyType::Int
        | PropertyType::Float
        | PropertyType::String => vec![property.to_string()],
        PropertyType::Rating => sub(&["rating"]),
        PropertyType::Category => sub(&["category"]),
        PropertyType::Email | PropertyType::Link => sub(&["value"]),
        PropertyType::User => sub(&["email"]),
        PropertyType::Im => sub(&["protocol", "address"]),
        PropertyType::GeoPt => sub(&["lat", "lon"]),
        PropertyType::DateTime => sub(&["usec", "usec_nsec"]),
        PropertyType::Key => sub(&["path"]),
        PropertyType::List => match direction {
            Direction::Ascending => sub(&[ASCENDING_SORT_KEY]),
            Direction::Descending => sub(&[DESCENDING_SORT_KEY]),
        },
    })
}
