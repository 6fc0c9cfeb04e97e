//! Finite categories, morphisms, and functors
//!
//! Objects carry finite carriers; morphisms are validated maps between them;
//! a category closes a set of generating morphisms under composition and
//! checks the category laws; a functor maps one category into another and
//! checks that identities and composition are preserved.

pub mod object;
pub mod morphism;
pub mod finite_category;
pub mod functor;
pub mod verification;
pub mod summary;

pub use object::{Element, ElementType, Object};
pub use morphism::{Morphism, MorphismKind};
pub use finite_category::Category;
pub use functor::{Functor, FunctorAction};
pub use verification::{CategoryConfig, Law, LawViolation, VerificationReport, VerificationScope};
pub use summary::{summary_schema, CategorySummary, MorphismSummary, ObjectSummary};
