//! Descriptor -> native query translation
//!
//! Translation is pure: it reads the descriptor and the kind's property
//! types and produces either a native `FindQuery` or `Translated::Empty`
//! when the query can never match (unorderable or unknown sort property,
//! range over an unorderable type).
//!
//! Filters on one property accumulate as a conjunction on the native field.
//! On a list property every predicate tests membership on its own, so two
//! equalities mean "contains both"; on a scalar property two different
//! equalities match nothing.

use kindstore_core::{
    DocFilter, Error, FilterClause, FilterOperator, FindQuery, Predicate, PropertyType,
    PropertyValue, QueryDescriptor, Result, SortField, Value, ID_FIELD, KEY_PROPERTY,
};

use crate::codec::{ancestor_pattern, encode_key, sort_paths, to_storage, LIST_ITEMS};
use crate::schema::PropertyTypes;

/// Outcome of translating a descriptor
#[derive(Debug, Clone, PartialEq)]
pub enum Translated {
    /// Native query to run
    Native(FindQuery),
    /// The query can never match; serve an empty, closed result
    Empty(String),
}

fn predicate(operator: FilterOperator, operand: Value) -> Result<Predicate> {
    Ok(match operator {
        FilterOperator::Equal => Predicate::Eq(operand),
        FilterOperator::LessThan => Predicate::Lt(operand),
        FilterOperator::LessThanOrEqual => Predicate::Lte(operand),
        FilterOperator::GreaterThan => Predicate::Gt(operand),
        FilterOperator::GreaterThanOrEqual => Predicate::Gte(operand),
        // rejected by translate_filter before any operand is encoded
        FilterOperator::In | FilterOperator::Exists => {
            return Err(Error::internal(format!(
                "operator {} reached predicate construction",
                operator.symbol()
            )))
        }
    })
}

enum FilterTarget {
    Native(String, Predicate),
    Never(String),
}

fn translate_filter(clause: &FilterClause, types: &PropertyTypes) -> Result<FilterTarget> {
    if matches!(clause.operator, FilterOperator::In | FilterOperator::Exists) {
        return Err(Error::bad_request(format!(
            "Unsupported filter operator {}",
            clause.operator.symbol()
        )));
    }
    let operand = clause.values.first().ok_or_else(|| {
        Error::bad_request(format!("Filter on {} has no value", clause.property))
    })?;

    if clause.property == KEY_PROPERTY {
        let key = operand.as_key().ok_or_else(|| {
            Error::bad_request(format!(
                "{} filter value must be a Key, got {}",
                KEY_PROPERTY,
                operand.type_name()
            ))
        })?;
        let encoded = Value::String(encode_key(key)?);
        return Ok(FilterTarget::Native(
            ID_FIELD.to_string(),
            predicate(clause.operator, encoded)?,
        ));
    }

    let stored = types.get(&clause.property).copied();
    if clause.operator.is_inequality() {
        let unorderable = |ty: PropertyType| !ty.is_orderable();
        if stored.map_or(false, unorderable) || unorderable(operand.property_type()) {
            return Ok(FilterTarget::Never(format!(
                "range filter on unorderable property {}",
                clause.property
            )));
        }
    }

    let path = match (stored, operand) {
        (Some(PropertyType::List), value) if !matches!(value, PropertyValue::List(_)) => {
            format!("{}.{}", clause.property, LIST_ITEMS)
        }
        _ => clause.property.clone(),
    };
    Ok(FilterTarget::Native(
        path,
        predicate(clause.operator, to_storage(operand)?)?,
    ))
}

/// Translate a descriptor into a native query
///
/// The caller has already checked the query limits and that the kind holds
/// data; `types` are the kind's property types.
///
/// # Errors
///
/// Returns `BadRequest` for unsupported operators, filters without a value
/// and `__key__` filters on non-key values; `MalformedKey` for keys that
/// cannot be encoded.
pub fn translate(query: &QueryDescriptor, types: &PropertyTypes) -> Result<Translated> {
    let mut filter = DocFilter::new();

    if let Some(ancestor) = &query.ancestor {
        filter.and(ID_FIELD, Predicate::Regex(ancestor_pattern(ancestor)?));
    }

    for clause in &query.filters {
        match translate_filter(clause, types)? {
            FilterTarget::Native(path, predicate) => filter.and(path, predicate),
            FilterTarget::Never(reason) => return Ok(Translated::Empty(reason)),
        }
    }

    let mut sort: Vec<SortField> = Vec::with_capacity(query.orders.len());
    for order in &query.orders {
        let paths = if order.property == KEY_PROPERTY {
            vec![ID_FIELD.to_string()]
        } else {
            let Some(ty) = types.get(&order.property) else {
                return Ok(Translated::Empty(format!(
                    "order on unknown property {}",
                    order.property
                )));
            };
            match sort_paths(&order.property, *ty, order.direction) {
                Some(paths) => paths,
                None => {
                    return Ok(Translated::Empty(format!(
                        "order on unorderable property {}",
                        order.property
                    )))
                }
            }
        };
        for path in paths {
            if !sort.iter().any(|s| s.path == path) {
                sort.push(SortField {
                    path,
                    direction: order.direction.into(),
                });
            }
        }
    }

    Ok(Translated::Native(FindQuery {
        filter,
        sort,
        skip: query.offset.unwrap_or(0),
        limit: query.limit,
    }))
}
