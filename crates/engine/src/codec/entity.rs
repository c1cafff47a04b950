//! Entity <-> document conversion
//!
//! A document's identifier is recomputed from the entity key on every
//! conversion; nothing caches it.

use kindstore_core::{Document, Entity, Result};

use super::key::{decode_key, encode_key};
use super::value::{from_storage, to_storage};

/// Build the document stored for an entity
///
/// # Errors
///
/// Returns `MalformedKey` if the entity key (or a key-valued property)
/// cannot be encoded.
pub fn document_from_entity(entity: &Entity) -> Result<Document> {
    let mut document = Document::new(encode_key(entity.key())?);
    for (name, value) in entity.properties() {
        document.fields.insert(name.clone(), to_storage(value)?);
    }
    Ok(document)
}

/// Rebuild an entity from its stored document
///
/// # Errors
///
/// Returns `MalformedKey` for an undecodable identifier and an internal
/// error for a field the value codec did not write.
pub fn entity_from_document(document: &Document) -> Result<Entity> {
    let mut entity = Entity::new(decode_key(&document.id)?);
    for (name, value) in &document.fields {
        entity.set(name.clone(), from_storage(value)?);
    }
    Ok(entity)
}
