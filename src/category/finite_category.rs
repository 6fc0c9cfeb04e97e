// Copyright 2025 Cowboy AI, LLC.

//! Finite categories
//!
//! A category is built from a set of objects and a set of generating
//! morphisms. Construction synthesizes one identity per object and then
//! checks the category laws:
//! - Associativity: `(f;g);h == f;(g;h)` for every composable triple
//! - Identity: `id_dom;f == f;id_cod` for every morphism
//!
//! If a law fails, construction returns [`CategoryError::AxiomViolation`]
//! and no category is produced.
//!
//! By default ([`VerificationScope::Generators`]) the laws are checked over
//! the generators only. Composites created later by [`Category::compose`] are
//! not re-checked. Use [`VerificationScope::Closure`] to check the full
//! closure instead.
//!
//! Composition is memoized: the morphism set and the composition table grow
//! as new pairs are composed, and the same pair always yields the same
//! composite.

use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, trace, warn};

use super::morphism::Morphism;
use super::object::{Element, Object};
use super::verification::{
    CategoryConfig, Law, LawViolation, VerificationReport, VerificationScope,
};
use crate::errors::{CategoryError, CategoryResult};
use crate::identifiers::{CategoryId, MorphismId, ObjectId};

struct CompositionState<E> {
    morphisms: IndexMap<MorphismId, Morphism<E>>,
    composition_table: IndexMap<(MorphismId, MorphismId), MorphismId>,
}

/// A finite category over elements of type `E`
pub struct Category<E> {
    id: CategoryId,
    name: String,
    config: CategoryConfig,
    objects: IndexMap<ObjectId, Object<E>>,
    identities: IndexMap<ObjectId, Morphism<E>>,
    generators: Vec<Morphism<E>>,
    state: RwLock<CompositionState<E>>,
    report: Option<VerificationReport>,
}

impl<E: Element> Category<E> {
    /// Create a category with the default configuration
    ///
    /// # Errors
    /// * [`CategoryError::UnknownObject`] if a generator leaves the given objects
    /// * [`CategoryError::AxiomViolation`] if a category law fails
    pub fn new(
        objects: impl IntoIterator<Item = Object<E>>,
        generators: impl IntoIterator<Item = Morphism<E>>,
    ) -> CategoryResult<Self> {
        Self::with_config("C", objects, generators, CategoryConfig::default())
    }

    /// Create a named category with an explicit configuration
    pub fn with_config(
        name: impl Into<String>,
        objects: impl IntoIterator<Item = Object<E>>,
        generators: impl IntoIterator<Item = Morphism<E>>,
        config: CategoryConfig,
    ) -> CategoryResult<Self> {
        let name = name.into();

        let objects: IndexMap<ObjectId, Object<E>> =
            objects.into_iter().map(|o| (o.id(), o)).collect();

        let identities: IndexMap<ObjectId, Morphism<E>> = objects
            .values()
            .map(|o| {
                let identity_name = format!("{}{}", config.identity_prefix, o.name());
                (o.id(), Morphism::identity(identity_name, o))
            })
            .collect();

        let mut generators: Vec<Morphism<E>> = generators.into_iter().collect();
        let mut seen = HashSet::new();
        generators.retain(|m| seen.insert(m.id()));

        for morphism in &generators {
            for endpoint in [morphism.domain(), morphism.codomain()] {
                if !objects.contains_key(&endpoint.id()) {
                    return Err(CategoryError::UnknownObject {
                        object: endpoint.name().to_string(),
                        category: name,
                    });
                }
            }
        }

        let morphisms = generators
            .iter()
            .chain(identities.values())
            .map(|m| (m.id(), m.clone()))
            .collect();

        let mut category = Self {
            id: CategoryId::new(),
            name,
            config,
            objects,
            identities,
            generators,
            state: RwLock::new(CompositionState {
                morphisms,
                composition_table: IndexMap::new(),
            }),
            report: None,
        };

        let report = category.verify_laws()?;
        info!(
            category = %category.name,
            objects = category.objects.len(),
            generators = category.generators.len(),
            triples = report.triples_checked,
            "Category laws verified"
        );
        category.report = Some(report);

        Ok(category)
    }

    /// Compose two morphisms: `f;g` applies `f` and then `g`
    ///
    /// Composing with an identity returns the other morphism unchanged. Any
    /// other pair is composed once and the result is returned again on later
    /// calls. A composite that is pointwise a morphism already in the
    /// category resolves to that morphism, so the result keeps that
    /// morphism's name and kind (`shout;whisper` may come back as
    /// `id_Words`). Otherwise it is added as a composite named `f;g`.
    ///
    /// # Errors
    /// * [`CategoryError::NotComposable`] if `f.codomain != g.domain`; nothing is recorded
    pub fn compose(&self, f: &Morphism<E>, g: &Morphism<E>) -> CategoryResult<Morphism<E>> {
        if !f.is_composable_with(g) {
            return Err(CategoryError::NotComposable {
                first: f.name().to_string(),
                first_domain: f.domain().name().to_string(),
                first_codomain: f.codomain().name().to_string(),
                second: g.name().to_string(),
                second_domain: g.domain().name().to_string(),
                second_codomain: g.codomain().name().to_string(),
            });
        }

        if f.is_identity() {
            return Ok(g.clone());
        }
        if g.is_identity() {
            return Ok(f.clone());
        }

        let (composite, _) = self.record_composite(f, g, None)?;
        Ok(composite)
    }

    /// Compose every composable pair until nothing new appears
    ///
    /// Returns the resulting morphism count.
    ///
    /// # Errors
    /// * [`CategoryError::ClosureLimitExceeded`] past `max_closure_size` morphisms
    pub fn close(&self) -> CategoryResult<usize> {
        let limit = self.config.max_closure_size;
        let mut pass = 0usize;

        loop {
            pass += 1;
            let snapshot = self.morphisms();
            let mut added = 0usize;

            for f in snapshot.iter().filter(|m| !m.is_identity()) {
                for g in snapshot.iter().filter(|m| !m.is_identity() && f.is_composable_with(m)) {
                    let (_, inserted) = self.record_composite(f, g, Some(limit))?;
                    if inserted {
                        added += 1;
                    }
                }
            }

            trace!(category = %self.name, pass, added, "Closure pass");
            if added == 0 {
                break;
            }
        }

        let count = self.morphism_count();
        debug!(category = %self.name, passes = pass, morphisms = count, "Closure complete");
        Ok(count)
    }

    /// Look up or create the composite of a composable, non-identity pair.
    ///
    /// A new composite whose graph matches a morphism already present is not
    /// inserted; the pair is recorded as composing to the existing morphism.
    /// The flag is true only when a morphism was added.
    fn record_composite(
        &self,
        f: &Morphism<E>,
        g: &Morphism<E>,
        limit: Option<usize>,
    ) -> CategoryResult<(Morphism<E>, bool)> {
        let key = (f.id(), g.id());
        if let Some(existing) = Self::memoized(&self.read_state(), &key) {
            return Ok((existing, false));
        }

        let candidate = Morphism::composite(self.composite_name(f, g), f, g)?;

        let mut state = self.write_state();
        if let Some(existing) = Self::memoized(&state, &key) {
            return Ok((existing, false));
        }

        let existing = state
            .morphisms
            .values()
            .find(|m| m.agrees_pointwise(&candidate))
            .cloned();
        if let Some(existing) = existing {
            state.composition_table.insert(key, existing.id());
            trace!(
                category = %self.name,
                pair = candidate.name(),
                existing = existing.name(),
                "Composite already present"
            );
            return Ok((existing, false));
        }

        if let Some(limit) = limit {
            if state.morphisms.len() >= limit {
                warn!(category = %self.name, limit, "Closure limit exceeded");
                return Err(CategoryError::ClosureLimitExceeded { limit });
            }
        }

        state.morphisms.insert(candidate.id(), candidate.clone());
        state.composition_table.insert(key, candidate.id());
        debug!(
            category = %self.name,
            composite = candidate.name(),
            morphisms = state.morphisms.len(),
            "Memoized composite"
        );

        Ok((candidate, true))
    }

    fn verify_laws(&self) -> CategoryResult<VerificationReport> {
        let scope = self.config.verification_scope;
        let mut report = VerificationReport::new(scope);

        let morphisms = match scope {
            VerificationScope::Generators => self.generators.clone(),
            VerificationScope::Closure => {
                self.close()?;
                self.morphisms()
            }
        };

        for f in &morphisms {
            for g in morphisms.iter().filter(|g| f.is_composable_with(g)) {
                let fg = self.compose(f, g)?;
                for h in morphisms.iter().filter(|h| g.is_composable_with(h)) {
                    let left = self.compose(&fg, h)?;
                    let right = self.compose(f, &self.compose(g, h)?)?;
                    report.triples_checked += 1;

                    if left != right {
                        let violation = LawViolation::new(
                            Law::Associativity,
                            vec![f.name().to_string(), g.name().to_string(), h.name().to_string()],
                        )
                        .with_message(format!(
                            "({0};{1});{2} and {0};({1};{2}) have different images",
                            f.name(),
                            g.name(),
                            h.name()
                        ));
                        warn!(category = %self.name, %violation, "Category law violated");
                        return Err(violation.into());
                    }
                }
            }
        }

        for f in &morphisms {
            let left = self.compose(self.identity(f.domain())?, f)?;
            let right = self.compose(f, self.identity(f.codomain())?)?;
            report.pairs_checked += 1;

            if left != right {
                let violation = LawViolation::new(Law::Identity, vec![f.name().to_string()])
                    .with_message(format!(
                        "id_dom;{0} and {0};id_cod have different images",
                        f.name()
                    ));
                warn!(category = %self.name, %violation, "Category law violated");
                return Err(violation.into());
            }
        }

        debug!(
            category = %self.name,
            triples = report.triples_checked,
            pairs = report.pairs_checked,
            "Checked category laws"
        );
        Ok(report.finish(self.morphism_count()))
    }

    /// The identity morphism of `object`
    ///
    /// # Errors
    /// * [`CategoryError::UnknownObject`] if `object` is not in this category
    pub fn identity(&self, object: &Object<E>) -> CategoryResult<&Morphism<E>> {
        self.identities
            .get(&object.id())
            .ok_or_else(|| CategoryError::UnknownObject {
                object: object.name().to_string(),
                category: self.name.clone(),
            })
    }

    /// Snapshot of the current morphism set, in insertion order
    pub fn morphisms(&self) -> Vec<Morphism<E>> {
        self.read_state().morphisms.values().cloned().collect()
    }

    /// Whether a morphism with this ID is part of the category
    pub fn contains_morphism(&self, morphism: &Morphism<E>) -> bool {
        self.read_state().morphisms.contains_key(&morphism.id())
    }

    /// Get all morphisms from a source object
    pub fn morphisms_from(&self, source: &Object<E>) -> Vec<Morphism<E>> {
        self.read_state()
            .morphisms
            .values()
            .filter(|m| m.domain() == source)
            .cloned()
            .collect()
    }

    /// Get all morphisms to a target object
    pub fn morphisms_to(&self, target: &Object<E>) -> Vec<Morphism<E>> {
        self.read_state()
            .morphisms
            .values()
            .filter(|m| m.codomain() == target)
            .cloned()
            .collect()
    }

    /// Get all morphisms `source → target` currently in the category
    pub fn hom_set(&self, source: &Object<E>, target: &Object<E>) -> Vec<Morphism<E>> {
        self.read_state()
            .morphisms
            .values()
            .filter(|m| m.domain() == source && m.codomain() == target)
            .cloned()
            .collect()
    }

    fn composite_name(&self, f: &Morphism<E>, g: &Morphism<E>) -> String {
        format!("{}{}{}", f.name(), self.config.composition_separator, g.name())
    }

    fn memoized(
        state: &CompositionState<E>,
        key: &(MorphismId, MorphismId),
    ) -> Option<Morphism<E>> {
        state
            .composition_table
            .get(key)
            .and_then(|id| state.morphisms.get(id))
            .cloned()
    }
}

impl<E> Category<E> {
    /// Unique identifier of this category
    pub fn id(&self) -> CategoryId {
        self.id
    }

    /// Name of this category
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configuration the category was built with
    pub fn config(&self) -> &CategoryConfig {
        &self.config
    }

    /// Objects, in insertion order
    pub fn objects(&self) -> impl Iterator<Item = &Object<E>> + '_ {
        self.objects.values()
    }

    /// Whether `object` belongs to this category
    pub fn contains_object(&self, object: &Object<E>) -> bool {
        self.objects.contains_key(&object.id())
    }

    /// Pairs of each object with its identity morphism
    pub fn identities(&self) -> impl Iterator<Item = (&Object<E>, &Morphism<E>)> + '_ {
        self.objects
            .iter()
            .filter_map(move |(id, o)| self.identities.get(id).map(|m| (o, m)))
    }

    /// The generating morphisms
    pub fn generators(&self) -> &[Morphism<E>] {
        &self.generators
    }

    /// Number of morphisms currently in the category
    pub fn morphism_count(&self) -> usize {
        self.read_state().morphisms.len()
    }

    /// Number of composable pairs with a recorded composite
    pub fn composition_count(&self) -> usize {
        self.read_state().composition_table.len()
    }

    /// What the construction-time law check covered
    pub fn verification_report(&self) -> Option<&VerificationReport> {
        self.report.as_ref()
    }

    fn read_state(&self) -> RwLockReadGuard<'_, CompositionState<E>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CompositionState<E>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E> fmt::Debug for Category<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Category")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("objects", &self.objects.len())
            .field("generators", &self.generators.len())
            .field("morphisms", &self.morphism_count())
            .finish()
    }
}
