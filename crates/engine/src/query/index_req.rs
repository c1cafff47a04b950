//! Composite index requirements
//!
//! A query needs a composite index over: its equality properties (sorted by
//! name), then its inequality property, then its order properties. A
//! trailing ascending `__key__` order is implied by every index and is
//! dropped. Built-in indexes serve, without a composite index:
//! - kind-only and ancestor-only queries
//! - equality-only queries without ancestor or orders
//! - queries touching a single property without ancestor

use std::collections::BTreeSet;
use std::fmt;

use kindstore_core::{Direction, OrderClause, QueryDescriptor, KEY_PROPERTY};

/// The composite index a query needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRequirement {
    /// Indexed kind
    pub kind: String,
    /// Whether the index is ancestor-scoped
    pub ancestor: bool,
    /// Indexed properties in order
    pub properties: Vec<OrderClause>,
}

impl fmt::Display for IndexRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kind: {}, ancestor: {}, properties: [", self.kind, self.ancestor)?;
        for (i, p) in self.properties.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let dir = match p.direction {
                Direction::Ascending => "asc",
                Direction::Descending => "desc",
            };
            write!(f, "{} {}", p.property, dir)?;
        }
        write!(f, "]")
    }
}

/// Compute the composite index a query needs, if any
pub fn required_index(query: &QueryDescriptor) -> Option<IndexRequirement> {
    let ancestor = query.ancestor.is_some();

    let equalities: BTreeSet<&str> = query
        .filters
        .iter()
        .filter(|f| !f.operator.is_inequality())
        .map(|f| f.property.as_str())
        .collect();
    let inequality = query
        .filters
        .iter()
        .find(|f| f.operator.is_inequality())
        .map(|f| f.property.as_str());

    if query.filters.is_empty() && query.orders.is_empty() {
        return None;
    }
    if inequality.is_none() && query.orders.is_empty() && !ancestor {
        return None;
    }

    let touched: BTreeSet<&str> = query
        .filters
        .iter()
        .map(|f| f.property.as_str())
        .chain(query.orders.iter().map(|o| o.property.as_str()))
        .collect();
    if touched.len() == 1 && !ancestor {
        return None;
    }

    let mut properties: Vec<OrderClause> = equalities
        .iter()
        .map(|p| OrderClause::new(*p, Direction::Ascending))
        .collect();

    let mut orders = query.orders.iter().peekable();
    if let Some(prop) = inequality {
        // The inequality column takes the direction of a leading order on it.
        let direction = match orders.peek() {
            Some(o) if o.property == prop => {
                let d = o.direction;
                orders.next();
                d
            }
            _ => Direction::Ascending,
        };
        properties.push(OrderClause::new(prop, direction));
    }
    for order in orders {
        if equalities.contains(order.property.as_str())
            || properties.iter().any(|p| p.property == order.property)
        {
            continue;
        }
        properties.push(order.clone());
    }

    if properties
        .last()
        .map_or(false, |p| p.property == KEY_PROPERTY && p.direction == Direction::Ascending)
    {
        properties.pop();
    }
    if properties.is_empty() {
        return None;
    }

    Some(IndexRequirement {
        kind: query.kind.clone(),
        ancestor,
        properties,
    })
}
