// Copyright 2025 Cowboy AI, LLC.

//! Functors between finite categories
//!
//! A functor is a pair of maps, one on objects and one on morphisms, that
//! preserves identities and composition. Both laws are checked pointwise at
//! construction, over every element of every relevant carrier:
//! - `F(id_a)(x) == id_F(a)(x)` for every object `a` and `x` in `F(a)`
//! - `F(f;g)(x) == (F(f);F(g))(x)` for every composable pair and `x` in `F(dom f)`
//!
//! Mapped morphisms are only evaluated on their own domains. When the two
//! sides of a law do not even share endpoints, the law fails without
//! evaluating anything.
//!
//! The composition check is quadratic in the number of morphisms of the
//! source category; it is meant for small categories.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::finite_category::Category;
use super::morphism::Morphism;
use super::object::{Element, Object};
use super::verification::{Law, LawViolation, VerificationReport};
use crate::errors::{CategoryError, CategoryResult};

// Type aliases for the mapping closures
type ObjectMap<E> = Arc<dyn Fn(&Object<E>) -> Object<E> + Send + Sync>;
type MorphismMap<E> = Arc<dyn Fn(&Morphism<E>) -> Morphism<E> + Send + Sync>;

/// Application of a functor to one kind of argument
pub trait FunctorAction<T> {
    /// Map `arg` into the target category
    fn act(&self, arg: &T) -> T;
}

/// A verified functor between two borrowed categories
pub struct Functor<'a, E> {
    name: String,
    domain: &'a Category<E>,
    codomain: &'a Category<E>,
    map_on_objects: ObjectMap<E>,
    map_on_morphisms: MorphismMap<E>,
    report: Option<VerificationReport>,
}

impl<'a, E: Element> Functor<'a, E> {
    /// Create a functor, checking identity and composition preservation
    ///
    /// # Errors
    /// * [`CategoryError::AxiomViolation`] if a functor law fails
    pub fn new<O, M>(
        domain: &'a Category<E>,
        codomain: &'a Category<E>,
        map_on_objects: O,
        map_on_morphisms: M,
    ) -> CategoryResult<Self>
    where
        O: Fn(&Object<E>) -> Object<E> + Send + Sync + 'static,
        M: Fn(&Morphism<E>) -> Morphism<E> + Send + Sync + 'static,
    {
        Self::from_parts(
            "F".to_string(),
            domain,
            codomain,
            Arc::new(map_on_objects),
            Arc::new(map_on_morphisms),
        )
    }

    /// The identity functor on `category`
    pub fn identity(category: &'a Category<E>) -> CategoryResult<Self> {
        Self::from_parts(
            format!("Id_{}", category.name()),
            category,
            category,
            Arc::new(|o: &Object<E>| o.clone()),
            Arc::new(|m: &Morphism<E>| m.clone()),
        )
    }

    /// The composite functor: apply `self`, then `next`
    ///
    /// # Errors
    /// * [`CategoryError::NotComposable`] if `self` does not land where `next` starts
    /// * [`CategoryError::AxiomViolation`] if the composite fails a functor law
    pub fn then(&self, next: &Functor<'a, E>) -> CategoryResult<Functor<'a, E>> {
        if self.codomain.id() != next.domain.id() {
            return Err(CategoryError::NotComposable {
                first: self.name.clone(),
                first_domain: self.domain.name().to_string(),
                first_codomain: self.codomain.name().to_string(),
                second: next.name.clone(),
                second_domain: next.domain.name().to_string(),
                second_codomain: next.codomain.name().to_string(),
            });
        }

        let (f_obj, g_obj) = (Arc::clone(&self.map_on_objects), Arc::clone(&next.map_on_objects));
        let (f_mor, g_mor) = (
            Arc::clone(&self.map_on_morphisms),
            Arc::clone(&next.map_on_morphisms),
        );

        Self::from_parts(
            format!("{};{}", self.name, next.name),
            self.domain,
            next.codomain,
            Arc::new(move |o: &Object<E>| g_obj(&f_obj(o))),
            Arc::new(move |m: &Morphism<E>| g_mor(&f_mor(m))),
        )
    }

    fn from_parts(
        name: String,
        domain: &'a Category<E>,
        codomain: &'a Category<E>,
        map_on_objects: ObjectMap<E>,
        map_on_morphisms: MorphismMap<E>,
    ) -> CategoryResult<Self> {
        let mut functor = Self {
            name,
            domain,
            codomain,
            map_on_objects,
            map_on_morphisms,
            report: None,
        };

        let report = functor.verify_laws()?;
        info!(
            functor = %functor.name,
            source = domain.name(),
            target = codomain.name(),
            pairs = report.pairs_checked,
            elements = report.elements_checked,
            "Functor laws verified"
        );
        functor.report = Some(report);

        Ok(functor)
    }

    /// Rename this functor
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Map an object from the source to the target category
    pub fn map_object(&self, object: &Object<E>) -> Object<E> {
        (self.map_on_objects)(object)
    }

    /// Map a morphism from the source to the target category
    pub fn map_morphism(&self, morphism: &Morphism<E>) -> Morphism<E> {
        (self.map_on_morphisms)(morphism)
    }

    /// Apply the functor to an object or a morphism
    pub fn apply<T>(&self, arg: &T) -> T
    where
        Self: FunctorAction<T>,
    {
        self.act(arg)
    }

    fn verify_laws(&self) -> CategoryResult<VerificationReport> {
        let mut report = VerificationReport::new(self.domain.config().verification_scope);

        // F(id_a) = id_F(a)
        for (object, identity) in self.domain.identities() {
            let target = self.map_object(object);
            let target_identity = self.codomain.identity(&target).map_err(|_| {
                self.violation(
                    LawViolation::new(Law::FunctorObjectMapping, vec![identity.name().to_string()])
                        .with_message(format!(
                            "{} is sent to {}, which is not an object of {}",
                            object.name(),
                            target.name(),
                            self.codomain.name()
                        )),
                )
            })?;
            let mapped = self.map_morphism(identity);
            if mapped.domain() != &target || mapped.codomain() != &target {
                return Err(self.violation(
                    LawViolation::new(Law::FunctorIdentity, vec![identity.name().to_string()])
                        .with_message(format!(
                            "F({}) is {}, which is not an endomorphism of {}",
                            identity.name(),
                            mapped,
                            target.name()
                        )),
                ));
            }

            for element in target.elements() {
                report.elements_checked += 1;
                let (lhs, rhs) = (mapped.eval(element), target_identity.eval(element));
                if lhs != rhs {
                    return Err(self.violation(
                        LawViolation::new(
                            Law::FunctorIdentity,
                            vec![identity.name().to_string()],
                        )
                        .at_element(element)
                        .with_message(format!(
                            "F({}) gives {:?}, {} gives {:?}",
                            identity.name(),
                            lhs,
                            target_identity.name(),
                            rhs
                        )),
                    ));
                }
            }
        }

        // F(f;g) = F(f);F(g)
        let morphisms = self.domain.morphisms();
        for f in &morphisms {
            for g in morphisms.iter().filter(|g| f.is_composable_with(g)) {
                let mapped_composite = self.map_morphism(&self.domain.compose(f, g)?);
                let (mapped_f, mapped_g) = (self.map_morphism(f), self.map_morphism(g));
                let composite_of_mapped = self
                    .codomain
                    .compose(&mapped_f, &mapped_g)
                    .map_err(|err| match err {
                        CategoryError::NotComposable { .. } => self.violation(
                            LawViolation::new(
                                Law::FunctorComposition,
                                vec![f.name().to_string(), g.name().to_string()],
                            )
                            .with_message(format!(
                                "F({}) = {} and F({}) = {} do not compose",
                                f.name(),
                                mapped_f,
                                g.name(),
                                mapped_g
                            )),
                        ),
                        other => other,
                    })?;
                report.pairs_checked += 1;

                if mapped_composite.domain() != composite_of_mapped.domain()
                    || mapped_composite.codomain() != composite_of_mapped.codomain()
                {
                    return Err(self.violation(
                        LawViolation::new(
                            Law::FunctorComposition,
                            vec![f.name().to_string(), g.name().to_string()],
                        )
                        .with_message(format!(
                            "F({};{}) is {}, but F({});F({}) is {}",
                            f.name(),
                            g.name(),
                            mapped_composite,
                            f.name(),
                            g.name(),
                            composite_of_mapped
                        )),
                    ));
                }

                for element in composite_of_mapped.domain().elements() {
                    report.elements_checked += 1;
                    let lhs = mapped_composite.eval(element);
                    let rhs = composite_of_mapped.eval(element);
                    if lhs != rhs {
                        return Err(self.violation(
                            LawViolation::new(
                                Law::FunctorComposition,
                                vec![f.name().to_string(), g.name().to_string()],
                            )
                            .at_element(element)
                            .with_message(format!(
                                "F({0};{1}) gives {2:?}, F({0});F({1}) gives {3:?}",
                                f.name(),
                                g.name(),
                                lhs,
                                rhs
                            )),
                        ));
                    }
                }
            }
        }

        debug!(
            functor = %self.name,
            pairs = report.pairs_checked,
            elements = report.elements_checked,
            "Checked functor laws"
        );
        Ok(report.finish(self.domain.morphism_count()))
    }

    fn violation(&self, violation: LawViolation) -> CategoryError {
        warn!(functor = %self.name, %violation, "Functor law violated");
        CategoryError::AxiomViolation(violation)
    }
}

impl<'a, E> Functor<'a, E> {
    /// Name of this functor
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source category
    pub fn domain(&self) -> &'a Category<E> {
        self.domain
    }

    /// Target category
    pub fn codomain(&self) -> &'a Category<E> {
        self.codomain
    }

    /// What the construction-time law check covered
    pub fn verification_report(&self) -> Option<&VerificationReport> {
        self.report.as_ref()
    }
}

impl<'a, E: Element> FunctorAction<Object<E>> for Functor<'a, E> {
    fn act(&self, arg: &Object<E>) -> Object<E> {
        self.map_object(arg)
    }
}

impl<'a, E: Element> FunctorAction<Morphism<E>> for Functor<'a, E> {
    fn act(&self, arg: &Morphism<E>) -> Morphism<E> {
        self.map_morphism(arg)
    }
}

impl<'a, E> fmt::Debug for Functor<'a, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Functor")
            .field("name", &self.name)
            .field("domain", &self.domain.name())
            .field("codomain", &self.codomain.name())
            .finish()
    }
}
