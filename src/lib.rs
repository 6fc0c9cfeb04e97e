//! # CIM Category
//!
//! Finite categories for the Composable Information Machine.
//!
//! This crate models categories whose objects have finite, enumerable
//! carriers, and checks that the laws of category theory actually hold for
//! them:
//! - **Object**: a named, typed, finite carrier
//! - **Morphism**: a map between carriers, validated when built (element
//!   types must match and every image must land in the codomain)
//! - **Category**: objects plus generating morphisms, closed under a memoized
//!   composition and checked for associativity and the identity laws
//! - **Functor**: object and morphism maps between categories, checked
//!   pointwise for identity and composition preservation
//!
//! ## Design Principles
//!
//! 1. **Checked at construction**: a `Category` or `Functor` only exists if
//!    its laws hold; violations come back as [`CategoryError::AxiomViolation`]
//! 2. **Extensional equality**: morphisms are compared by endpoints and image
//!    sets, never by name
//! 3. **Shared objects**: objects are shared handles with stable identity
//! 4. **Finite by construction**: carriers are ordered sets, so every law can
//!    be checked exhaustively
//!
//! ## Example
//!
//! ```
//! use cim_category::{Category, ElementType, Functor, Morphism, Object};
//! use std::collections::BTreeSet;
//!
//! let a = Object::new("A", ElementType::Integer, vec![1, 2]);
//! let b = Object::new("B", ElementType::Integer, vec![1]);
//! let f = Morphism::new("f", &a, &b, |_| 1)?;
//! let g = Morphism::new("g", &b, &a, |_| 2)?;
//!
//! let category = Category::new([a.clone(), b.clone()], [f.clone(), g.clone()])?;
//! let fg = category.compose(&f, &g)?;
//! assert_eq!(fg.apply(&a), BTreeSet::from([2]));
//!
//! let identity = Functor::identity(&category)?;
//! assert_eq!(identity.apply(&a), a);
//! # Ok::<(), cim_category::CategoryError>(())
//! ```

#![warn(missing_docs)]

mod errors;
mod identifiers;
pub mod category;

pub use errors::{CategoryError, CategoryResult};
pub use identifiers::{CategoryId, MorphismId, ObjectId};
pub use category::{
    summary_schema, Category, CategoryConfig, CategorySummary, Element, ElementType, Functor,
    FunctorAction, Law, LawViolation, Morphism, MorphismKind, MorphismSummary, Object,
    ObjectSummary, VerificationReport, VerificationScope,
};
