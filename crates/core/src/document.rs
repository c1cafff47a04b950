//! Native document store primitives
//!
//! These are the only query shapes the document store has to understand:
//! - `DocFilter`: per-field conjunctions of comparison and pattern predicates
//! - `SortField`: ascending/descending sort on a dotted path
//! - `FindQuery`: filter + sort + skip + limit
//! - `IndexSpec`: a named, ordered list of indexed paths

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::value::Value;

/// Field holding a document's identifier
pub const ID_FIELD: &str = "_id";

/// A stored document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Primary key
    pub id: String,
    /// Attributes
    pub fields: BTreeMap<String, Value>,
}

impl Document {
    /// Create an empty document
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Resolve a dotted path; `_id` resolves to the identifier
    pub fn resolve(&self, path: &str) -> Option<Value> {
        if path == ID_FIELD {
            return Some(Value::String(self.id.clone()));
        }
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, rest),
            None => (path, ""),
        };
        self.fields.get(head)?.lookup(rest).cloned()
    }
}

/// Outcome of an upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No document had this id before
    Inserted,
    /// An existing document was replaced
    Replaced,
}

/// A single predicate on one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// Equal to
    Eq(Value),
    /// Strictly less than
    Lt(Value),
    /// Less than or equal
    Lte(Value),
    /// Strictly greater than
    Gt(Value),
    /// Greater than or equal
    Gte(Value),
    /// String matches a regular expression
    Regex(String),
}

/// Native filter: for every field path, all predicates must hold
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocFilter {
    fields: BTreeMap<String, Vec<Predicate>>,
}

impl DocFilter {
    /// Create an empty filter (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate on a path
    ///
    /// Predicates on the same path accumulate; an identical predicate is
    /// recorded once.
    pub fn and(&mut self, path: impl Into<String>, predicate: Predicate) {
        let predicates = self.fields.entry(path.into()).or_default();
        if !predicates.contains(&predicate) {
            predicates.push(predicate);
        }
    }

    /// Builder-style variant of [`DocFilter::and`]
    pub fn with(mut self, path: impl Into<String>, predicate: Predicate) -> Self {
        self.and(path, predicate);
        self
    }

    /// Predicates on a path
    pub fn predicates(&self, path: &str) -> &[Predicate] {
        self.fields.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate (path, predicates) in path order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Predicate>)> {
        self.fields.iter()
    }

    /// Check whether the filter has no predicates
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Native sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

impl SortDirection {
    /// Conventional numeric form (`1` / `-1`) used in index names
    pub fn as_i32(self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

/// One sort column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortField {
    /// Dotted field path
    pub path: String,
    /// Direction
    pub direction: SortDirection,
}

impl SortField {
    /// Ascending sort on `path`
    pub fn asc(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on `path`
    pub fn desc(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// A complete native find request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FindQuery {
    /// Filter
    pub filter: DocFilter,
    /// Sort columns, most significant first
    pub sort: Vec<SortField>,
    /// Documents to skip
    pub skip: u64,
    /// Maximum documents to return
    pub limit: Option<u64>,
}

impl FindQuery {
    /// Query matching `filter` in natural (id) order
    pub fn new(filter: DocFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }
}

/// A native index definition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexSpec {
    /// Index name, unique within a collection
    pub name: String,
    /// Indexed paths in order
    pub fields: Vec<SortField>,
}

impl IndexSpec {
    /// Build a spec whose name is derived from its fields (`a_1_b_-1`)
    pub fn from_fields(fields: Vec<SortField>) -> Self {
        Self {
            name: Self::derive_name(&fields),
            fields,
        }
    }

    /// Conventional name for an ordered list of fields
    pub fn derive_name(fields: &[SortField]) -> String {
        fields
            .iter()
            .map(|f| format!("{}_{}", f.path, f.direction.as_i32()))
            .collect::<Vec<_>>()
            .join("_")
    }
}
