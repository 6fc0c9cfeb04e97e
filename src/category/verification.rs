// Copyright 2025 Cowboy AI, LLC.

//! Law verification policy and results
//!
//! Categories and functors check their laws eagerly at construction. This
//! module holds the knobs for that check ([`CategoryConfig`]), the record of
//! what was checked ([`VerificationReport`]), and the description of a failed
//! law ([`LawViolation`]).

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CategoryResult;

/// The laws checked by categories and functors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Law {
    /// `(f;g);h == f;(g;h)`
    Associativity,
    /// `id_dom;f == f;id_cod`
    Identity,
    /// `F(id_a) == id_F(a)`, pointwise
    FunctorIdentity,
    /// `F(f;g) == F(f);F(g)`, pointwise
    FunctorComposition,
    /// `F(a)` must be an object of the target category
    FunctorObjectMapping,
}

impl fmt::Display for Law {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Law::Associativity => "associativity",
            Law::Identity => "identity",
            Law::FunctorIdentity => "functor identity preservation",
            Law::FunctorComposition => "functor composition preservation",
            Law::FunctorObjectMapping => "functor object mapping",
        };
        write!(f, "{name}")
    }
}

/// A failed law, with the morphisms (and element) that witness it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LawViolation {
    /// Which law failed
    pub law: Law,

    /// Names of the offending morphisms, in composition order
    pub morphisms: Vec<String>,

    /// Debug rendering of the element where a pointwise check failed
    pub element: Option<String>,

    /// Free-form detail
    pub message: String,
}

impl LawViolation {
    /// Create a violation for a law and its witnessing morphisms
    pub fn new(law: Law, morphisms: Vec<String>) -> Self {
        Self {
            law,
            morphisms,
            element: None,
            message: String::new(),
        }
    }

    /// Attach the element a pointwise check failed on
    pub fn at_element(mut self, element: impl fmt::Debug) -> Self {
        self.element = Some(format!("{element:?}"));
        self
    }

    /// Attach a detail message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl fmt::Display for LawViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} fails for [{}]", self.law, self.morphisms.join(", "))?;
        if let Some(element) = &self.element {
            write!(f, " at {element}")?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

/// Which morphisms the category laws are checked over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum VerificationScope {
    /// Only the generating morphisms; composites are trusted
    #[default]
    Generators,
    /// The full composition closure, computed before checking
    Closure,
}

/// Configuration for building a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CategoryConfig {
    /// Morphisms the laws are checked over
    pub verification_scope: VerificationScope,
    /// Inserted between names of composed morphisms
    pub composition_separator: String,
    /// Prefix of synthesized identity morphism names
    pub identity_prefix: String,
    /// Upper bound on the morphism count reached by [`close`](super::Category::close)
    pub max_closure_size: usize,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            verification_scope: VerificationScope::Generators,
            composition_separator: ";".to_string(),
            identity_prefix: "id_".to_string(),
            max_closure_size: 4096,
        }
    }
}

impl CategoryConfig {
    /// Load a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> CategoryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Same config, checking laws over the given scope
    pub fn with_scope(mut self, scope: VerificationScope) -> Self {
        self.verification_scope = scope;
        self
    }
}

/// What a successful law check covered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VerificationReport {
    /// Scope of the category law check
    pub scope: VerificationScope,
    /// Composable triples checked for associativity
    pub triples_checked: usize,
    /// Morphisms or composable pairs checked for the identity/composition laws
    pub pairs_checked: usize,
    /// Individual element comparisons (functors only)
    pub elements_checked: usize,
    /// Morphisms in the category when the check finished
    pub morphism_count: usize,
    /// When the check finished
    pub checked_at: DateTime<Utc>,
}

impl VerificationReport {
    pub(crate) fn new(scope: VerificationScope) -> Self {
        Self {
            scope,
            triples_checked: 0,
            pairs_checked: 0,
            elements_checked: 0,
            morphism_count: 0,
            checked_at: Utc::now(),
        }
    }

    pub(crate) fn finish(mut self, morphism_count: usize) -> Self {
        self.morphism_count = morphism_count;
        self.checked_at = Utc::now();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = CategoryConfig::default();
        assert_eq!(config.verification_scope, VerificationScope::Generators);
        assert_eq!(config.composition_separator, ";");
        assert_eq!(config.identity_prefix, "id_");
        assert_eq!(config.max_closure_size, 4096);
    }

    #[test]
    fn test_config_from_partial_json() {
        let json = r#"{"verification_scope": "Closure", "max_closure_size": 16}"#;
        let config = CategoryConfig::from_json(json).unwrap();
        assert_eq!(config.verification_scope, VerificationScope::Closure);
        assert_eq!(config.max_closure_size, 16);
        assert_eq!(config.composition_separator, ";");

        assert!(CategoryConfig::from_json("{").is_err());
    }

    #[test]
    fn test_violation_display() {
        let violation = LawViolation::new(Law::FunctorComposition, vec!["f".into(), "g".into()])
            .at_element(2)
            .with_message("F(f;g) sends 2 to 1, F(f);F(g) sends it to 2");
        assert_eq!(
            violation.to_string(),
            "functor composition preservation fails for [f, g] at 2: F(f;g) sends 2 to 1, F(f);F(g) sends it to 2"
        );

        let bare = LawViolation::new(Law::Identity, vec!["f".into()]);
        assert_eq!(bare.to_string(), "identity fails for [f]");
    }
}
