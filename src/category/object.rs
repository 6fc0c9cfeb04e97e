// Copyright 2025 Cowboy AI, LLC.

//! Objects - named, typed, finite carriers

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::identifiers::ObjectId;

/// Values that can live in an object's carrier
pub trait Element: Clone + Ord + Hash + Debug + Send + Sync + 'static {}

impl<T> Element for T where T: Clone + Ord + Hash + Debug + Send + Sync + 'static {}

/// Coarse type tag of a carrier's elements
///
/// Morphisms may only connect objects whose tags are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ElementType {
    /// Signed integers
    Integer,
    /// Natural numbers
    Natural,
    /// Text values
    Text,
    /// Truth values
    Boolean,
    /// Anything else, named by the caller
    Custom {
        /// Name of the element type
        type_name: String,
    },
}

impl ElementType {
    /// Create a custom element type tag
    pub fn custom(type_name: impl Into<String>) -> Self {
        ElementType::Custom {
            type_name: type_name.into(),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Integer => write!(f, "integer"),
            ElementType::Natural => write!(f, "natural"),
            ElementType::Text => write!(f, "text"),
            ElementType::Boolean => write!(f, "boolean"),
            ElementType::Custom { type_name } => write!(f, "{type_name}"),
        }
    }
}

#[derive(Debug)]
struct ObjectData<E> {
    id: ObjectId,
    name: String,
    element_type: ElementType,
    carrier: BTreeSet<E>,
}

/// An object of a finite category
///
/// Cloning an object shares it; equality and hashing follow its [`ObjectId`],
/// so two objects built separately from the same data are different objects.
pub struct Object<E> {
    inner: Arc<ObjectData<E>>,
}

impl<E: Element> Object<E> {
    /// Create a new object from any finite collection of elements
    pub fn new(
        name: impl Into<String>,
        element_type: ElementType,
        carrier: impl IntoIterator<Item = E>,
    ) -> Self {
        Self {
            inner: Arc::new(ObjectData {
                id: ObjectId::new(),
                name: name.into(),
                element_type,
                carrier: carrier.into_iter().collect(),
            }),
        }
    }

    /// Check whether `element` belongs to the carrier
    pub fn contains(&self, element: &E) -> bool {
        self.inner.carrier.contains(element)
    }

    /// Iterate over the carrier in order
    pub fn elements(&self) -> impl Iterator<Item = &E> + '_ {
        self.inner.carrier.iter()
    }
}

impl<E> Object<E> {
    /// Identity of this object
    pub fn id(&self) -> ObjectId {
        self.inner.id
    }

    /// Name of this object
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Element type tag
    pub fn element_type(&self) -> &ElementType {
        &self.inner.element_type
    }

    /// Read-only view of the carrier
    pub fn carrier(&self) -> &BTreeSet<E> {
        &self.inner.carrier
    }

    /// Number of elements in the carrier
    pub fn cardinality(&self) -> usize {
        self.inner.carrier.len()
    }
}

impl<E> Clone for Object<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> PartialEq for Object<E> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl<E> Eq for Object<E> {}

impl<E> Hash for Object<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl<E: Debug> Debug for Object<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("name", &self.inner.name)
            .field("element_type", &self.inner.element_type)
            .field("carrier", &self.inner.carrier)
            .finish()
    }
}

impl<E> fmt::Display for Object<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.name)
    }
}
