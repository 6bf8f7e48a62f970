use std::collections::HashMap;

use vireo_types::{substitutor_by_map, Substitutor, Type, TypeEnv, TypeStore};

use pretty_assertions::assert_eq;

#[test]
fn substitutes_inside_type_arguments_and_keeps_class_identity() {
    let mut store = TypeStore::with_builtins();
    let wk = *store.well_known();
    let list = store.class_id("kotlin.collections.List").unwrap();
    let t = store.add_type_param("T", vec![Type::class(wk.number, vec![])]);

    let subst = substitutor_by_map(HashMap::from([(t, Type::class(wk.int, vec![]))]));

    let list_t = Type::class(list, vec![Type::TypeParam(t)]);
    assert_eq!(
        subst.substitute_or_self(&list_t),
        Type::class(list, vec![Type::class(wk.int, vec![])])
    );
}

#[test]
fn substitutes_both_flexible_bounds() {
    let mut store = TypeStore::with_builtins();
    let wk = *store.well_known();
    let t = store.add_type_param("T", vec![Type::class(wk.number, vec![])]);
    let number = Type::class(wk.number, vec![]);

    let subst = substitutor_by_map(HashMap::from([(t, number.clone())]));
    let flexible = Type::flexible(Type::TypeParam(t), Type::TypeParam(t));

    assert_eq!(
        subst.substitute(&flexible),
        Some(Type::flexible(number.clone(), number))
    );
}

#[test]
fn empty_substitutor_returns_input_unchanged() {
    let store = TypeStore::with_builtins();
    let string = Type::class(store.well_known().string, vec![]);
    assert_eq!(Substitutor::Empty.substitute_or_self(&string), string);
    assert_eq!(Substitutor::Empty.substitute(&Type::Error), None);
}

#[test]
fn error_types_are_left_alone() {
    let mut store = TypeStore::with_builtins();
    let t = store.add_type_param("T", vec![]);
    let subst = substitutor_by_map(HashMap::from([(t, Type::Error)]));
    assert_eq!(subst.substitute(&Type::Error), None);
    assert_eq!(subst.substitute(&Type::TypeParam(t)), Some(Type::Error));
}
