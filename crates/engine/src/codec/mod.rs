//! Translation between the datastore model and native documents
//!
//! - key: hierarchical keys to sortable document identifiers
//! - value: typed property values to native values
//! - entity: whole entities to documents

pub mod entity;
pub mod key;
pub mod value;

pub use entity::{document_from_entity, entity_from_document};
pub use key::{ancestor_pattern, decode_key, encode_key};
pub use value::{from_storage, sort_paths, to_storage, LIST_ITEMS};
