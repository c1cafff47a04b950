//! Composite index <-> native index mapping
//!
//! No index metadata is kept on the side: a composite index exists exactly
//! when the kind's collection has a native index of the derived name. The
//! name lists `field_direction` pairs joined by `_`, `__key__` becomes
//! `_id`, and an ancestor index leads with `_id_1`.

use kindstore_core::{
    CompositeIndex, Direction, DocumentStore, IndexSpec, OrderClause, Result, SortDirection,
    SortField, ID_FIELD, KEY_PROPERTY,
};
use kindstore_storage::ID_INDEX_NAME;

/// Native index fields for a composite index
pub fn index_fields(ancestor: bool, properties: &[OrderClause]) -> Vec<SortField> {
    let mut fields = Vec::with_capacity(properties.len() + 1);
    if ancestor {
        fields.push(SortField::asc(ID_FIELD));
    }
    for p in properties {
        let path = if p.property == KEY_PROPERTY {
            ID_FIELD.to_string()
        } else {
            p.property.clone()
        };
        fields.push(SortField {
            path,
            direction: p.direction.into(),
        });
    }
    fields
}

/// Native index name for a composite index
pub fn index_name(ancestor: bool, properties: &[OrderClause]) -> String {
    IndexSpec::derive_name(&index_fields(ancestor, properties))
}

/// Check whether the kind's collection has the native index
///
/// # Errors
///
/// Propagates store errors.
pub fn exists(
    store: &dyn DocumentStore,
    kind: &str,
    ancestor: bool,
    properties: &[OrderClause],
) -> Result<bool> {
    let name = index_name(ancestor, properties);
    Ok(store.list_indexes(kind)?.iter().any(|spec| spec.name == name))
}

/// Rebuild a composite index definition from a native index
///
/// A leading ascending `_id` followed by more fields is read back as an
/// ancestor index. Returns `None` for the implicit identifier index.
pub fn definition_from_spec(app: &str, kind: &str, spec: &IndexSpec) -> Option<CompositeIndex> {
    if spec.name == ID_INDEX_NAME {
        return None;
    }
    let (ancestor, fields) = match spec.fields.split_first() {
        Some((first, rest))
            if first.path == ID_FIELD
                && first.direction == SortDirection::Ascending
                && !rest.is_empty() =>
        {
            (true, rest)
        }
        _ => (false, spec.fields.as_slice()),
    };
    let properties = fields
        .iter()
        .map(|f| {
            let property = if f.path == ID_FIELD {
                KEY_PROPERTY.to_string()
            } else {
                f.path.clone()
            };
            OrderClause::new(property, Direction::from(f.direction))
        })
        .collect();
    Some(CompositeIndex {
        id: 0,
        app: app.to_string(),
        kind: kind.to_string(),
        ancestor,
        properties,
    })
}
