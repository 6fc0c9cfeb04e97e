//! Worked examples over the objects A = {1, 2}, B = {1}, D = {1, 2, 3}

use std::collections::BTreeSet;

use cim_category::{
    Category, CategoryConfig, CategoryError, ElementType, Functor, Morphism, Object,
    VerificationScope,
};
use pretty_assertions::assert_eq;
use test_case::test_case;

struct Fixture {
    a: Object<i64>,
    b: Object<i64>,
    d: Object<i64>,
    f: Morphism<i64>,
    g: Morphism<i64>,
}

fn fixture() -> anyhow::Result<Fixture> {
    let a = Object::new("A", ElementType::Integer, vec![1, 2]);
    let b = Object::new("B", ElementType::Integer, vec![1]);
    let d = Object::new("D", ElementType::Integer, vec![1, 2, 3]);
    let f = Morphism::new("f", &a, &b, |_| 1)?;
    let g = Morphism::new("g", &b, &a, |_| 2)?;
    Ok(Fixture { a, b, d, f, g })
}

#[test]
fn constant_map_to_singleton_forms_a_category() -> anyhow::Result<()> {
    let Fixture { a, b, f, .. } = fixture()?;
    assert_eq!(f.apply(&a), BTreeSet::from([1]));

    let category = Category::new([a.clone(), b.clone()], [f.clone()])?;

    let left = category.compose(category.identity(&a)?, &f)?;
    let right = category.compose(&f, category.identity(&b)?)?;
    assert_eq!(left, f);
    assert_eq!(right, f);
    assert_eq!(left.apply(&a), BTreeSet::from([1]));
    Ok(())
}

#[test]
fn map_escaping_codomain_is_rejected() -> anyhow::Result<()> {
    let Fixture { a, d, .. } = fixture()?;
    let result = Morphism::new("hom_a_d", &a, &d, |x| if *x == 1 { 1 } else { 5 });

    match result {
        Err(CategoryError::ImageNotSubsetOfCodomain { morphism, domain, codomain, .. }) => {
            assert_eq!(
                (morphism.as_str(), domain.as_str(), codomain.as_str()),
                ("hom_a_d", "A", "D")
            );
        }
        other => panic!("expected ImageNotSubsetOfCodomain, got {other:?}"),
    }

    // the inclusion A → D is fine
    let include = Morphism::new("include", &a, &d, |x| *x)?;
    assert_eq!(include.apply(&a), BTreeSet::from([1, 2]));
    Ok(())
}

#[test]
fn composing_back_and_forth() -> anyhow::Result<()> {
    let Fixture { a, b, f, g, .. } = fixture()?;
    let category = Category::new([a.clone(), b.clone()], [f.clone(), g.clone()])?;

    let fg = category.compose(&f, &g)?;
    assert_eq!(fg.domain(), &a);
    assert_eq!(fg.codomain(), &a);
    assert_eq!(fg.apply(&a), BTreeSet::from([2]));
    assert_eq!(fg.eval(&1), 2);

    let gf = category.compose(&g, &f)?;
    assert_eq!(gf.domain(), &b);
    assert_eq!(gf.codomain(), &b);
    assert_eq!(gf.apply(&b), BTreeSet::from([1]));
    Ok(())
}

#[test]
fn single_generator_categories_and_identity_functor() -> anyhow::Result<()> {
    let Fixture { a, b, g, .. } = fixture()?;
    let category = Category::new([a.clone(), b.clone()], [g.clone()])?;

    assert_eq!(g.apply(&b), BTreeSet::from([2]));
    assert_eq!(category.compose(category.identity(&b)?, &g)?.apply(&b), BTreeSet::from([2]));
    assert_eq!(category.compose(&g, category.identity(&a)?)?.apply(&b), BTreeSet::from([2]));

    let identity = Functor::identity(&category)?;
    let mapped = identity.apply(&a);
    assert_eq!(mapped.name(), "A");
    assert_eq!(mapped.carrier(), a.carrier());
    Ok(())
}

#[test]
fn image_equal_right_factors_can_give_different_composites() -> anyhow::Result<()> {
    let Fixture { a, d, .. } = fixture()?;
    let to_one = Morphism::new("to_one", &a, &d, |_| 1)?;
    let keep = Morphism::new("keep", &d, &d, |x| *x)?;
    let swap = Morphism::new("swap", &d, &d, |x| match *x {
        1 => 2,
        2 => 1,
        other => other,
    })?;
    let category = Category::new([a.clone(), d], [to_one.clone(), keep.clone(), swap.clone()])?;

    // both are onto D, so they are equal as image sets
    assert_eq!(keep, swap);
    assert!(!keep.agrees_pointwise(&swap));

    let kept = category.compose(&to_one, &keep)?;
    let swapped = category.compose(&to_one, &swap)?;
    assert_eq!(kept.apply(&a), BTreeSet::from([1]));
    assert_eq!(swapped.apply(&a), BTreeSet::from([2]));
    assert_ne!(kept, swapped);
    Ok(())
}

#[test]
fn composing_unmatched_morphisms_fails() -> anyhow::Result<()> {
    let Fixture { a, b, f, g, .. } = fixture()?;
    let category = Category::new([a, b], [g])?;
    let before = category.morphism_count();

    let err = category.compose(&f, &f).unwrap_err();
    assert!(err.is_recoverable());
    assert!(err.to_string().contains("the codomain of f was B, while the domain of f was A"));
    assert_eq!(category.morphism_count(), before);
    Ok(())
}

#[test_case(VerificationScope::Generators, 5 ; "generators only")]
#[test_case(VerificationScope::Closure, 5 ; "full closure")]
fn verification_scopes_agree_on_small_category(scope: VerificationScope, morphisms: usize) {
    let Fixture { a, b, f, g, .. } = fixture().unwrap();
    let config = CategoryConfig::default().with_scope(scope);
    let category = Category::with_config("D", [a, b], [f, g], config).unwrap();

    let report = category.verification_report().expect("report after construction");
    assert_eq!(report.scope, scope);
    assert_eq!(category.close().unwrap(), morphisms);
}

#[test_case(ElementType::Natural ; "natural")]
#[test_case(ElementType::Text ; "text")]
#[test_case(ElementType::custom("colour") ; "custom")]
fn mismatched_element_types_are_rejected(other: ElementType) {
    let a = Object::new("A", ElementType::Integer, vec![1, 2]);
    let x = Object::new("X", other, vec![1, 2]);
    let err = Morphism::new("f", &a, &x, |v| *v).unwrap_err();
    assert!(matches!(err, CategoryError::TypeMismatch { .. }));
}
