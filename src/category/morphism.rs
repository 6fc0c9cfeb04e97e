// Copyright 2025 Cowboy AI, LLC.

//! Morphisms - validated maps between object carriers
//!
//! A morphism is checked when it is built: its domain and codomain must carry
//! the same element type, and every element of the domain must land in the
//! codomain. The graph of the map over the domain is computed during that
//! check and kept, so equality, hashing, and evaluation never re-run the
//! caller's closure on domain elements.
//!
//! Equality is extensional over *image sets*: two morphisms are equal when
//! their endpoints agree and `{f(x) | x in dom}` is the same set for both.
//! [`Morphism::agrees_pointwise`] is the stronger graph comparison.
//!
//! Image-set equality is not a congruence for composition on the right. On
//! `D = {1, 2, 3}` the identity and the swap of 1 and 2 are equal, yet after
//! the constant map `A → D` at 1 they give images `{1}` and `{2}`. Composing
//! on the left with pointwise-equal morphisms is safe.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::object::{Element, Object};
use crate::errors::{CategoryError, CategoryResult};
use crate::identifiers::MorphismId;

type MapFn<E> = Arc<dyn Fn(&E) -> E + Send + Sync>;

/// How a morphism came into a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorphismKind {
    /// Supplied by the caller
    Generator,
    /// Synthesized identity of an object
    Identity,
    /// Built by composing two morphisms, first then second
    Composite {
        /// Morphism applied first
        first: MorphismId,
        /// Morphism applied second
        second: MorphismId,
    },
}

struct MorphismData<E> {
    id: MorphismId,
    name: String,
    kind: MorphismKind,
    domain: Object<E>,
    codomain: Object<E>,
    map: MapFn<E>,
    graph: BTreeMap<E, E>,
    image: BTreeSet<E>,
}

/// A structure-preserving map between two objects
pub struct Morphism<E> {
    inner: Arc<MorphismData<E>>,
}

impl<E: Element> Morphism<E> {
    /// Create a new morphism, validating element types and image containment
    ///
    /// # Errors
    /// * [`CategoryError::TypeMismatch`] if the endpoints carry different element types
    /// * [`CategoryError::ImageNotSubsetOfCodomain`] if some image escapes the codomain
    pub fn new<F>(
        name: impl Into<String>,
        domain: &Object<E>,
        codomain: &Object<E>,
        map: F,
    ) -> CategoryResult<Self>
    where
        F: Fn(&E) -> E + Send + Sync + 'static,
    {
        Self::build(
            name.into(),
            MorphismKind::Generator,
            domain.clone(),
            codomain.clone(),
            Arc::new(map),
        )
    }

    /// The identity morphism on `object`
    pub(crate) fn identity(name: String, object: &Object<E>) -> Self {
        let graph: BTreeMap<E, E> = object.elements().map(|e| (e.clone(), e.clone())).collect();
        Self {
            inner: Arc::new(MorphismData {
                id: MorphismId::new(),
                name,
                kind: MorphismKind::Identity,
                domain: object.clone(),
                codomain: object.clone(),
                map: Arc::new(|e: &E| e.clone()),
                image: object.carrier().clone(),
                graph,
            }),
        }
    }

    /// The composite `first;second`, which applies `first` and then `second`
    pub(crate) fn composite(name: String, first: &Self, second: &Self) -> CategoryResult<Self> {
        let (f, g) = (first.clone(), second.clone());
        Self::build(
            name,
            MorphismKind::Composite {
                first: first.id(),
                second: second.id(),
            },
            first.domain().clone(),
            second.codomain().clone(),
            Arc::new(move |x: &E| g.eval(&f.eval(x))),
        )
    }

    fn build(
        name: String,
        kind: MorphismKind,
        domain: Object<E>,
        codomain: Object<E>,
        map: MapFn<E>,
    ) -> CategoryResult<Self> {
        if domain.element_type() != codomain.element_type() {
            return Err(CategoryError::TypeMismatch {
                domain: domain.name().to_string(),
                domain_type: domain.element_type().to_string(),
                codomain: codomain.name().to_string(),
                codomain_type: codomain.element_type().to_string(),
            });
        }

        let mut graph = BTreeMap::new();
        for element in domain.elements() {
            let image = map(element);
            if !codomain.contains(&image) {
                return Err(CategoryError::ImageNotSubsetOfCodomain {
                    morphism: name,
                    domain: domain.name().to_string(),
                    codomain: codomain.name().to_string(),
                    element: format!("{image:?}"),
                });
            }
            graph.insert(element.clone(), image);
        }
        let image = graph.values().cloned().collect();

        Ok(Self {
            inner: Arc::new(MorphismData {
                id: MorphismId::new(),
                name,
                kind,
                domain,
                codomain,
                map,
                graph,
                image,
            }),
        })
    }

    /// Evaluate the morphism at a single element
    ///
    /// Domain elements are looked up in the cached graph. Anything else runs
    /// the caller's map unchecked; the law checks in this crate only evaluate
    /// morphisms on their own domains.
    pub fn eval(&self, element: &E) -> E {
        match self.inner.graph.get(element) {
            Some(image) => image.clone(),
            None => (self.inner.map)(element),
        }
    }

    /// Apply the morphism to an object: the set of images of its carrier
    pub fn apply(&self, object: &Object<E>) -> BTreeSet<E> {
        object.elements().map(|e| self.eval(e)).collect()
    }

    /// Graph equality: same endpoints and the same value at every domain element
    pub fn agrees_pointwise(&self, other: &Self) -> bool {
        self.domain() == other.domain()
            && self.codomain() == other.codomain()
            && self.inner.graph == other.inner.graph
    }
}

impl<E> Morphism<E> {
    /// Identity of this morphism
    pub fn id(&self) -> MorphismId {
        self.inner.id
    }

    /// Name of this morphism
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// How this morphism was produced
    pub fn kind(&self) -> MorphismKind {
        self.inner.kind
    }

    /// Whether this is a synthesized identity
    pub fn is_identity(&self) -> bool {
        self.inner.kind == MorphismKind::Identity
    }

    /// Source object
    pub fn domain(&self) -> &Object<E> {
        &self.inner.domain
    }

    /// Target object
    pub fn codomain(&self) -> &Object<E> {
        &self.inner.codomain
    }

    /// Image set of the domain carrier
    pub fn image(&self) -> &BTreeSet<E> {
        &self.inner.image
    }

    /// The map, tabulated over the domain carrier
    pub fn graph(&self) -> &BTreeMap<E, E> {
        &self.inner.graph
    }

    /// Whether `self;next` is defined
    pub fn is_composable_with(&self, next: &Self) -> bool {
        self.inner.codomain == next.inner.domain
    }
}

impl<E> Clone for Morphism<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Element> PartialEq for Morphism<E> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.domain == other.inner.domain
            && self.inner.codomain == other.inner.codomain
            && self.inner.image == other.inner.image
    }
}

impl<E: Element> Eq for Morphism<E> {}

impl<E: Element> Hash for Morphism<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.domain.hash(state);
        self.inner.codomain.hash(state);
        self.inner.image.hash(state);
    }
}

impl<E: fmt::Debug> fmt::Debug for Morphism<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Morphism")
            .field("name", &self.inner.name)
            .field("kind", &self.inner.kind)
            .field("domain", &self.inner.domain.name())
            .field("codomain", &self.inner.codomain.name())
            .field("graph", &self.inner.graph)
            .finish()
    }
}

impl<E> fmt::Display for Morphism<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} → {}",
            self.inner.name,
            self.inner.domain.name(),
            self.inner.codomain.name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::object::ElementType;
    use std::collections::HashSet;

    fn objects() -> (Object<i64>, Object<i64>, Object<i64>) {
        (
            Object::new("A", ElementType::Integer, vec![1, 2]),
            Object::new("B", ElementType::Integer, vec![1]),
            Object::new("D", ElementType::Integer, vec![1, 2, 3]),
        )
    }

    #[test]
    fn test_constant_morphism() {
        let (a, b, _) = objects();
        let f = Morphism::new("f", &a, &b, |_| 1).unwrap();

        assert_eq!(f.name(), "f");
        assert_eq!(f.kind(), MorphismKind::Generator);
        assert_eq!(f.domain(), &a);
        assert_eq!(f.codomain(), &b);
        assert_eq!(f.apply(&a), BTreeSet::from([1]));
        assert_eq!(f.eval(&2), 1);
        assert_eq!(f.to_string(), "f: A → B");
    }

    #[test]
    fn test_image_must_stay_in_codomain() {
        let (a, _, d) = objects();
        let err = Morphism::new("hom_a_d", &a, &d, |x| if *x == 1 { 1 } else { 5 }).unwrap_err();

        match err {
            CategoryError::ImageNotSubsetOfCodomain {
                morphism,
                domain,
                codomain,
                element,
            } => {
                assert_eq!(morphism, "hom_a_d");
                assert_eq!(domain, "A");
                assert_eq!(codomain, "D");
                assert_eq!(element, "5");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_element_types_must_match() {
        let (a, _, _) = objects();
        let n = Object::new("N", ElementType::Natural, vec![1, 2]);
        let err = Morphism::new("f", &a, &n, |x| *x).unwrap_err();
        assert!(matches!(err, CategoryError::TypeMismatch { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_extensional_equality_ignores_names() {
        let (a, _, d) = objects();
        let inc = Morphism::new("inc", &a, &d, |x| x + 1).unwrap();
        let shift = Morphism::new("shift", &a, &d, |x| if *x == 1 { 2 } else { 3 }).unwrap();
        let swap = Morphism::new("swap", &a, &d, |x| if *x == 1 { 3 } else { 2 }).unwrap();
        let konst = Morphism::new("konst", &a, &d, |_| 3).unwrap();

        assert_eq!(inc, shift);
        assert!(inc.agrees_pointwise(&shift));

        // same image set, different graph
        assert_eq!(inc, swap);
        assert!(!inc.agrees_pointwise(&swap));

        assert_ne!(inc, konst);
    }

    #[test]
    fn test_hash_agrees_with_equality() {
        let (a, _, d) = objects();
        let inc = Morphism::new("inc", &a, &d, |x| x + 1).unwrap();
        let shift = Morphism::new("shift", &a, &d, |x| if *x == 1 { 2 } else { 3 }).unwrap();

        let set: HashSet<_> = [inc, shift].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_equality_requires_same_endpoints() {
        let (a, b, _) = objects();
        let b_twin = Object::new("B", ElementType::Integer, vec![1]);
        let f = Morphism::new("f", &a, &b, |_| 1).unwrap();
        let f_twin = Morphism::new("f", &a, &b_twin, |_| 1).unwrap();
        assert_ne!(f, f_twin);
    }

    #[test]
    fn test_composite_applies_first_then_second() {
        let (a, b, _) = objects();
        let f = Morphism::new("f", &a, &b, |_| 1).unwrap();
        let g = Morphism::new("g", &b, &a, |_| 2).unwrap();

        let fg = Morphism::composite("f;g".to_string(), &f, &g).unwrap();
        assert_eq!(fg.domain(), &a);
        assert_eq!(fg.codomain(), &a);
        assert_eq!(fg.graph(), &BTreeMap::from([(1, 2), (2, 2)]));
        assert_eq!(
            fg.kind(),
            MorphismKind::Composite {
                first: f.id(),
                second: g.id()
            }
        );
    }

    #[test]
    fn test_identity_is_tagged() {
        let (a, _, _) = objects();
        let id = Morphism::identity("id_A".to_string(), &a);
        assert!(id.is_identity());
        assert_eq!(id.image(), a.carrier());
        assert_eq!(id.eval(&2), 2);
        // outside the domain the map itself is used
        assert_eq!(id.eval(&7), 7);
    }
}
