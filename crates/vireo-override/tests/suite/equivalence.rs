use std::collections::HashMap;

use vireo_override::TypeEquivalence;
use vireo_types::{substitutor_by_map, StructuralTypeContext, Substitutor, Type};

use crate::suite::fixture::Fixture;

#[test]
fn ground_types_are_reflexive() {
    let fx = Fixture::new();
    let eq = TypeEquivalence::new(&fx.store, &StructuralTypeContext);

    for ty in [fx.string(), fx.list(fx.int()), fx.unit()] {
        assert!(eq.is_equal_types(&ty, &ty, &Substitutor::Empty));
    }
}

#[test]
fn read_only_and_mutable_collections_compare_equal() {
    let fx = Fixture::new();
    let eq = TypeEquivalence::new(&fx.store, &StructuralTypeContext);

    let read_only = fx.list(fx.string());
    let mutable = fx.mutable_list(fx.string());
    assert!(eq.is_equal_types(&mutable, &read_only, &Substitutor::Empty));
    assert!(eq.is_equal_types(&read_only, &mutable, &Substitutor::Empty));

    let set = fx.named("Set", vec![fx.string()]);
    assert!(!eq.is_equal_types(&set, &read_only, &Substitutor::Empty));
}

#[test]
fn type_arguments_are_ignored_by_default() {
    let fx = Fixture::new();
    let eq = TypeEquivalence::new(&fx.store, &StructuralTypeContext);

    let strings = fx.list(fx.string());
    let ints = fx.mutable_list(fx.int());
    assert!(eq.is_equal_types(&strings, &ints, &Substitutor::Empty));
}

#[test]
fn type_arguments_are_compared_when_enabled() {
    let fx = Fixture::new();
    let eq = TypeEquivalence::new(&fx.store, &StructuralTypeContext).with_type_arguments(true);

    let strings = fx.list(fx.string());
    let ints = fx.list(fx.int());
    let mutable_strings = fx.mutable_list(fx.string());
    assert!(!eq.is_equal_types(&strings, &ints, &Substitutor::Empty));
    assert!(eq.is_equal_types(&mutable_strings, &strings, &Substitutor::Empty));

    let flexible_arg = fx.list(Type::flexible(fx.string(), fx.string()));
    assert!(eq.is_equal_types(&flexible_arg, &strings, &Substitutor::Empty));
}

#[test]
fn flexible_types_compare_through_their_lower_bound() {
    let fx = Fixture::new();
    let eq = TypeEquivalence::new(&fx.store, &StructuralTypeContext);

    let flexible = Type::flexible(fx.string(), fx.named("Any", vec![]));
    assert!(eq.is_equal_types(&flexible, &fx.string(), &Substitutor::Empty));
    assert!(eq.is_equal_types(&fx.string(), &flexible, &Substitutor::Empty));
    assert!(!eq.is_equal_types(&flexible, &fx.named("Any", vec![]), &Substitutor::Empty));
}

#[test]
fn error_types_are_never_equal() {
    let fx = Fixture::new();
    let eq = TypeEquivalence::new(&fx.store, &StructuralTypeContext);

    assert!(!eq.is_equal_types(&Type::Error, &Type::Error, &Substitutor::Empty));
    assert!(!eq.is_equal_types(&Type::Error, &fx.string(), &Substitutor::Empty));
    assert!(!eq.is_equal_types(&fx.string(), &Type::Error, &Substitutor::Empty));

    let flexible_error = Type::flexible(Type::Error, Type::Error);
    assert!(!eq.is_equal_types(&flexible_error, &flexible_error, &Substitutor::Empty));
}

#[test]
fn type_parameters_compare_after_substitution() {
    let mut fx = Fixture::new();
    let number = fx.number();
    let t = fx.type_param("T", number.clone());
    let u = fx.type_param("U", number.clone());
    let eq = TypeEquivalence::new(&fx.store, &StructuralTypeContext);

    let t_ty = Type::TypeParam(t);
    let u_ty = Type::TypeParam(u);

    assert!(eq.is_equal_types(&t_ty, &t_ty, &Substitutor::Empty));
    assert!(!eq.is_equal_types(&t_ty, &u_ty, &Substitutor::Empty));
    assert!(!eq.is_equal_types(&number, &t_ty, &Substitutor::Empty));

    let erased = substitutor_by_map(HashMap::from([(t, number.clone()), (u, number.clone())]));
    assert!(eq.is_equal_types(&t_ty, &u_ty, &erased));
    assert!(eq.is_equal_types(&number, &t_ty, &erased));
    assert!(!eq.is_equal_types(&fx.string(), &t_ty, &erased));
}

#[test]
fn substitution_into_an_error_is_not_equal() {
    let mut fx = Fixture::new();
    let t = fx.type_param("T", Type::Error);
    let eq = TypeEquivalence::new(&fx.store, &StructuralTypeContext);

    let subst = substitutor_by_map(HashMap::from([(t, Type::Error)]));
    assert!(!eq.is_equal_types(&Type::TypeParam(t), &Type::TypeParam(t), &subst));
}
