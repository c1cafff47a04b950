//! Core types for kindstore
//!
//! This module defines the datastore's addressing model:
//! - Identifier: A caller-assigned name or a system-assigned numeric id
//! - PathElement: One (kind, identifier) pair
//! - Key: The ordered ancestor path of an entity
//! - Entity: A key plus its typed properties

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::key::{validate_kind, validate_name, KeyError};
use crate::property::PropertyValue;

/// Identifier of one path element
///
/// Ordering: numeric ids sort before names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Identifier {
    /// System-assigned numeric id
    Id(i64),
    /// Caller-assigned name
    Name(String),
    /// Not assigned yet; the id is allocated on first write
    Unassigned,
}

impl Identifier {
    /// Check whether an identifier has been assigned
    pub fn is_assigned(&self) -> bool {
        !matches!(self, Identifier::Unassigned)
    }
}

/// One (kind, identifier) pair of a key path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathElement {
    /// Kind name
    pub kind: String,
    /// Name or numeric id
    pub id: Identifier,
}

impl PathElement {
    /// Create a path element with a caller-assigned name
    pub fn with_name(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: Identifier::Name(name.into()),
        }
    }

    /// Create a path element with a numeric id
    pub fn with_id(kind: impl Into<String>, id: i64) -> Self {
        Self {
            kind: kind.into(),
            id: Identifier::Id(id),
        }
    }

    /// Create a path element whose id is assigned on first write
    pub fn incomplete(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: Identifier::Unassigned,
        }
    }

    fn validate(&self) -> Result<(), KeyError> {
        validate_kind(&self.kind)?;
        match &self.id {
            Identifier::Name(name) => validate_name(name),
            Identifier::Id(_) => Ok(()),
            Identifier::Unassigned => Err(KeyError::Incomplete {
                kind: self.kind.clone(),
            }),
        }
    }
}

/// Hierarchical entity key
///
/// A key is an ordered list of (kind, identifier) pairs. The last pair names
/// the entity itself; every prior pair names an ancestor.
///
/// # Examples
///
/// ```
/// use kindstore_core::{Key, Identifier};
///
/// let owner = Key::named("Person", "alice");
/// let pet = owner.child("Pet", Identifier::Id(7));
/// assert_eq!(pet.kind(), "Pet");
/// assert!(owner.is_ancestor_of(&pet));
/// assert_eq!(pet.parent(), Some(owner));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key {
    path: Vec<PathElement>,
}

impl Key {
    /// Create a key from an explicit path
    pub fn from_path(path: Vec<PathElement>) -> Self {
        Self { path }
    }

    /// Root key with a name
    pub fn named(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::from_path(vec![PathElement::with_name(kind, name)])
    }

    /// Root key with a numeric id
    pub fn with_id(kind: impl Into<String>, id: i64) -> Self {
        Self::from_path(vec![PathElement::with_id(kind, id)])
    }

    /// Root key whose id is allocated on first write
    pub fn incomplete(kind: impl Into<String>) -> Self {
        Self::from_path(vec![PathElement::incomplete(kind)])
    }

    /// Create a descendant key one level below this one
    pub fn child(&self, kind: impl Into<String>, id: Identifier) -> Self {
        let mut path = self.path.clone();
        path.push(PathElement {
            kind: kind.into(),
            id,
        });
        Self { path }
    }

    /// The path elements, root first
    pub fn path(&self) -> &[PathElement] {
        &self.path
    }

    /// The entity's own path element
    pub fn last(&self) -> Option<&PathElement> {
        self.path.last()
    }

    /// The entity's kind (empty for an empty path)
    pub fn kind(&self) -> &str {
        self.path.last().map(|e| e.kind.as_str()).unwrap_or("")
    }

    /// Parent key, if this key is not a root
    pub fn parent(&self) -> Option<Key> {
        if self.path.len() < 2 {
            return None;
        }
        Some(Self::from_path(self.path[..self.path.len() - 1].to_vec()))
    }

    /// Numeric id of the last element, if it has one
    pub fn id(&self) -> Option<i64> {
        match self.last().map(|e| &e.id) {
            Some(Identifier::Id(id)) => Some(*id),
            _ => None,
        }
    }

    /// Name of the last element, if it has one
    pub fn name(&self) -> Option<&str> {
        match self.last().map(|e| &e.id) {
            Some(Identifier::Name(name)) => Some(name),
            _ => None,
        }
    }

    /// Check whether every path element has an identifier
    pub fn is_complete(&self) -> bool {
        !self.path.is_empty() && self.path.iter().all(|e| e.id.is_assigned())
    }

    /// Check whether this key is a proper ancestor of `other`
    pub fn is_ancestor_of(&self, other: &Key) -> bool {
        self.path.len() < other.path.len() && other.path.starts_with(&self.path)
    }

    /// Copy of this key with the last element's id replaced
    pub fn with_last_id(&self, id: i64) -> Self {
        let mut path = self.path.clone();
        if let Some(last) = path.last_mut() {
            last.id = Identifier::Id(id);
        }
        Self { path }
    }

    /// Validate every component of a complete key
    pub fn validate(&self) -> Result<(), KeyError> {
        if self.path.is_empty() {
            return Err(KeyError::EmptyPath);
        }
        self.path.iter().try_for_each(PathElement::validate)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, elem) in self.path.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            match &elem.id {
                Identifier::Id(id) => write!(f, "{}({})", elem.kind, id)?,
                Identifier::Name(name) => write!(f, "{}({:?})", elem.kind, name)?,
                Identifier::Unassigned => write!(f, "{}(?)", elem.kind)?,
            }
        }
        Ok(())
    }
}

/// A datastore entity: key plus typed properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    key: Key,
    properties: BTreeMap<String, PropertyValue>,
}

impl Entity {
    /// Create an entity with no properties
    pub fn new(key: Key) -> Self {
        Self {
            key,
            properties: BTreeMap::new(),
        }
    }

    /// Builder-style property setter
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a property, replacing any previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Get a property by name
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// The entity key
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Replace the entity key (used when an id is allocated)
    pub fn set_key(&mut self, key: Key) {
        self.key = key;
    }

    /// The entity kind
    pub fn kind(&self) -> &str {
        self.key.kind()
    }

    /// All properties in name order
    pub fn properties(&self) -> &BTreeMap<String, PropertyValue> {
        &self.properties
    }

    /// Split into key and properties
    pub fn into_parts(self) -> (Key, BTreeMap<String, PropertyValue>) {
        (self.key, self.properties)
    }
}
