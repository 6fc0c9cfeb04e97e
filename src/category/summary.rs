// Copyright 2025 Cowboy AI, LLC.

//! Serializable snapshots of categories
//!
//! Elements are rendered with their `Debug` form so any element type can be
//! exported.

use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::finite_category::Category;
use super::morphism::{Morphism, MorphismKind};
use super::object::{Element, ElementType, Object};
use super::verification::VerificationReport;
use crate::errors::CategoryResult;
use crate::identifiers::{CategoryId, MorphismId, ObjectId};

/// Snapshot of an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ObjectSummary {
    /// Object identity
    pub id: ObjectId,
    /// Object name
    pub name: String,
    /// Element type tag
    pub element_type: ElementType,
    /// Carrier elements, in order
    pub carrier: Vec<String>,
}

/// Snapshot of a morphism
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MorphismSummary {
    /// Morphism identity
    pub id: MorphismId,
    /// Morphism name
    pub name: String,
    /// "generator", "identity" or "composite"
    pub kind: String,
    /// Domain name
    pub domain: String,
    /// Codomain name
    pub codomain: String,
    /// `(element, image)` pairs over the domain carrier
    pub graph: Vec<(String, String)>,
}

/// Snapshot of a category and its current morphism set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategorySummary {
    /// Category identity
    pub id: CategoryId,
    /// Category name
    pub name: String,
    /// Objects, in insertion order
    pub objects: Vec<ObjectSummary>,
    /// Morphisms, in insertion order
    pub morphisms: Vec<MorphismSummary>,
    /// Recorded composable pairs
    pub compositions: usize,
    /// Construction-time law check
    pub verification: Option<VerificationReport>,
}

impl<E: Element> From<&Object<E>> for ObjectSummary {
    fn from(object: &Object<E>) -> Self {
        Self {
            id: object.id(),
            name: object.name().to_string(),
            element_type: object.element_type().clone(),
            carrier: object.elements().map(|e| format!("{e:?}")).collect(),
        }
    }
}

impl<E: Element> From<&Morphism<E>> for MorphismSummary {
    fn from(morphism: &Morphism<E>) -> Self {
        let kind = match morphism.kind() {
            MorphismKind::Generator => "generator",
            MorphismKind::Identity => "identity",
            MorphismKind::Composite { .. } => "composite",
        };
        Self {
            id: morphism.id(),
            name: morphism.name().to_string(),
            kind: kind.to_string(),
            domain: morphism.domain().name().to_string(),
            codomain: morphism.codomain().name().to_string(),
            graph: morphism
                .graph()
                .iter()
                .map(|(x, y)| (format!("{x:?}"), format!("{y:?}")))
                .collect(),
        }
    }
}

impl<E: Element> Category<E> {
    /// Snapshot the category as it is now
    pub fn summary(&self) -> CategorySummary {
        CategorySummary {
            id: self.id(),
            name: self.name().to_string(),
            objects: self.objects().map(ObjectSummary::from).collect(),
            morphisms: self.morphisms().iter().map(MorphismSummary::from).collect(),
            compositions: self.composition_count(),
            verification: self.verification_report().cloned(),
        }
    }

    /// Render the current snapshot as pretty-printed JSON
    pub fn to_json(&self) -> CategoryResult<String> {
        Ok(serde_json::to_string_pretty(&self.summary())?)
    }
}

/// JSON schema of [`CategorySummary`]
pub fn summary_schema() -> CategoryResult<serde_json::Value> {
    Ok(serde_json::to_value(schema_for!(CategorySummary))?)
}
