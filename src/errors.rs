// Copyright 2025 Cowboy AI, LLC.

//! Error types for category operations

use thiserror::Error;

use crate::category::verification::LawViolation;

/// Errors that can occur while building or using finite categories
#[derive(Debug, Clone, Error)]
pub enum CategoryError {
    /// Domain and codomain carry different element types
    #[error("Type mismatch: {domain} has element type {domain_type}, but {codomain} has element type {codomain_type}")]
    TypeMismatch {
        /// Name of the domain object
        domain: String,
        /// Element type of the domain
        domain_type: String,
        /// Name of the codomain object
        codomain: String,
        /// Element type of the codomain
        codomain_type: String,
    },

    /// The map sends some domain element outside the codomain carrier
    #[error("The image of {domain} under {morphism} must be a subset of {codomain} ({element} escapes it)")]
    ImageNotSubsetOfCodomain {
        /// Name of the rejected morphism
        morphism: String,
        /// Name of the domain object
        domain: String,
        /// Name of the codomain object
        codomain: String,
        /// Debug rendering of the first escaping image
        element: String,
    },

    /// Codomain of the first morphism differs from the domain of the second
    #[error("Unable to form the composition {first};{second}: the codomain of {first} was {first_codomain}, while the domain of {second} was {second_domain}")]
    NotComposable {
        /// Name of the first morphism
        first: String,
        /// Domain of the first morphism
        first_domain: String,
        /// Codomain of the first morphism
        first_codomain: String,
        /// Name of the second morphism
        second: String,
        /// Domain of the second morphism
        second_domain: String,
        /// Codomain of the second morphism
        second_codomain: String,
    },

    /// A category or functor law does not hold
    #[error("Axiom violation: {0}")]
    AxiomViolation(LawViolation),

    /// Object is not part of the category
    #[error("Unknown object: {object} is not an object of {category}")]
    UnknownObject {
        /// Name of the object
        object: String,
        /// Name of the category
        category: String,
    },

    /// Closure computation grew past the configured bound
    #[error("Closure limit exceeded: more than {limit} morphisms")]
    ClosureLimitExceeded {
        /// Configured maximum number of morphisms
        limit: usize,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for category operations
pub type CategoryResult<T> = Result<T, CategoryError>;

impl From<serde_json::Error> for CategoryError {
    fn from(err: serde_json::Error) -> Self {
        CategoryError::Serialization(err.to_string())
    }
}

impl From<LawViolation> for CategoryError {
    fn from(violation: LawViolation) -> Self {
        CategoryError::AxiomViolation(violation)
    }
}

impl CategoryError {
    /// Check if this error means the structure is not a category or functor
    pub fn is_axiom_violation(&self) -> bool {
        matches!(self, CategoryError::AxiomViolation(_))
    }

    /// Check if the caller can correct the input and retry
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CategoryError::TypeMismatch { .. }
                | CategoryError::ImageNotSubsetOfCodomain { .. }
                | CategoryError::NotComposable { .. }
                | CategoryError::UnknownObject { .. }
        )
    }

    /// The law violation carried by this error, if any
    pub fn violation(&self) -> Option<&LawViolation> {
        match self {
            CategoryError::AxiomViolation(violation) => Some(violation),
            _ => None,
        }
    }
}
