//! Datastore query descriptors
//!
//! A `QueryDescriptor` is the structured query handed over by the inbound
//! surface: kind, filters, orders, ancestor scope, offset/limit and an
//! optional planner hint. It is immutable once translation begins.

use serde::{Deserialize, Serialize};

use crate::document::SortDirection;
use crate::property::PropertyValue;
use crate::types::Key;

/// Property name that denotes the entity's own key
pub const KEY_PROPERTY: &str = "__key__";

/// Filter comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOperator {
    /// `<`
    LessThan,
    /// `<=`
    LessThanOrEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanOrEqual,
    /// `=`
    Equal,
    /// Set membership; split client-side, never valid here
    In,
    /// Property presence; never valid here
    Exists,
}

impl FilterOperator {
    /// Operator symbol
    pub fn symbol(self) -> &'static str {
        match self {
            FilterOperator::LessThan => "<",
            FilterOperator::LessThanOrEqual => "<=",
            FilterOperator::GreaterThan => ">",
            FilterOperator::GreaterThanOrEqual => ">=",
            FilterOperator::Equal => "=",
            FilterOperator::In => "IN",
            FilterOperator::Exists => "EXISTS",
        }
    }

    /// Check whether this is a range (inequality) operator
    pub fn is_inequality(self) -> bool {
        matches!(
            self,
            FilterOperator::LessThan
                | FilterOperator::LessThanOrEqual
                | FilterOperator::GreaterThan
                | FilterOperator::GreaterThanOrEqual
        )
    }
}

/// One filter clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterClause {
    /// Property name (or [`KEY_PROPERTY`])
    pub property: String,
    /// Operator
    pub operator: FilterOperator,
    /// Operands; comparison operators use the first one
    pub values: Vec<PropertyValue>,
}

impl FilterClause {
    /// Single-operand filter clause
    pub fn new(
        property: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<PropertyValue>,
    ) -> Self {
        Self {
            property: property.into(),
            operator,
            values: vec![value.into()],
        }
    }
}

/// Sort direction of an order clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

impl From<Direction> for SortDirection {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Ascending => SortDirection::Ascending,
            Direction::Descending => SortDirection::Descending,
        }
    }
}

impl From<SortDirection> for Direction {
    fn from(d: SortDirection) -> Self {
        match d {
            SortDirection::Ascending => Direction::Ascending,
            SortDirection::Descending => Direction::Descending,
        }
    }
}

/// One order clause
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderClause {
    /// Property name (or [`KEY_PROPERTY`])
    pub property: String,
    /// Direction
    pub direction: Direction,
}

impl OrderClause {
    /// Create an order clause
    pub fn new(property: impl Into<String>, direction: Direction) -> Self {
        Self {
            property: property.into(),
            direction,
        }
    }
}

/// Planner hint; carries no semantics and is stripped from history keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryHint {
    /// Prefer the order index
    OrderFirst,
    /// Prefer the ancestor scan
    AncestorFirst,
    /// Prefer the filter index
    FilterFirst,
}

/// A structured datastore query
///
/// # Example
///
/// ```
/// use kindstore_core::{Direction, FilterOperator, QueryDescriptor};
///
/// let query = QueryDescriptor::new("app", "Pet")
///     .filter("type", FilterOperator::Equal, "cat")
///     .order("weight", Direction::Descending)
///     .limit(10);
/// assert_eq!(query.component_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// Application id
    pub app: String,
    /// Kind to query
    pub kind: String,
    /// Filter clauses (conjunction)
    #[serde(default)]
    pub filters: Vec<FilterClause>,
    /// Order clauses, most significant first
    #[serde(default)]
    pub orders: Vec<OrderClause>,
    /// Restrict results to descendants of this key (and the key itself)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ancestor: Option<Key>,
    /// Results to skip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Maximum results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Planner hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<QueryHint>,
}

impl QueryDescriptor {
    /// Query over every entity of a kind
    pub fn new(app: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            kind: kind.into(),
            filters: Vec::new(),
            orders: Vec::new(),
            ancestor: None,
            offset: None,
            limit: None,
            hint: None,
        }
    }

    /// Add a single-operand filter
    pub fn filter(
        mut self,
        property: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.filters.push(FilterClause::new(property, operator, value));
        self
    }

    /// Add an order clause
    pub fn order(mut self, property: impl Into<String>, direction: Direction) -> Self {
        self.orders.push(OrderClause::new(property, direction));
        self
    }

    /// Restrict to an ancestor
    pub fn ancestor(mut self, key: Key) -> Self {
        self.ancestor = Some(key);
        self
    }

    /// Set the offset
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the limit
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the planner hint
    pub fn hint(mut self, hint: QueryHint) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Filters + orders + 1 if an ancestor is present
    pub fn component_count(&self) -> usize {
        self.filters.len() + self.orders.len() + usize::from(self.ancestor.is_some())
    }

    /// Copy of this descriptor with the hint cleared
    pub fn without_hint(&self) -> Self {
        Self {
            hint: None,
            ..self.clone()
        }
    }
}

/// Result of starting a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Cursor handle; `0` means nothing to resume
    pub cursor: u64,
    /// Whether `next` may yield more results
    pub more_results: bool,
}

impl QueryResult {
    /// The closed, empty result
    pub fn empty() -> Self {
        Self {
            cursor: 0,
            more_results: false,
        }
    }
}

/// A composite index definition as exposed by the index management API
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositeIndex {
    /// Index id; `0` for a definition not created yet
    #[serde(default)]
    pub id: u64,
    /// Application id
    pub app: String,
    /// Indexed kind
    pub kind: String,
    /// Whether the index is ancestor-scoped
    #[serde(default)]
    pub ancestor: bool,
    /// Indexed properties in order
    pub properties: Vec<OrderClause>,
}
