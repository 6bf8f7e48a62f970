use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use vireo_override::{build_erasure_substitutor, collect_type_params, is_type_param_dependent};
use vireo_types::{
    DeclOrigin, FunctionDecl, PropertyDecl, Substitutor, Type, TypeParamDef, TypeRef,
};

use crate::suite::fixture::Fixture;

#[test]
fn non_generic_pairs_use_the_empty_substitutor() {
    let fx = Fixture::new();
    let base = FunctionDecl::new("foo", DeclOrigin::Source, fx.unit()).with_param("x", fx.string());
    let candidate =
        FunctionDecl::new("foo", DeclOrigin::Java, fx.unit()).with_param("x", fx.string());

    let subst = build_erasure_substitutor(&fx.store, &candidate.signature(), &base.signature());
    assert_eq!(subst, Substitutor::Empty);
}

#[test]
fn dependency_requires_a_bare_type_parameter() {
    let mut fx = Fixture::new();
    let t = fx.type_param("T", fx.number());

    let nested = FunctionDecl::new("foo", DeclOrigin::Source, fx.unit())
        .with_param("xs", fx.list(Type::TypeParam(t)));
    assert!(!is_type_param_dependent(&nested.signature()));

    let bare_return = FunctionDecl::new("foo", DeclOrigin::Source, Type::TypeParam(t));
    assert!(is_type_param_dependent(&bare_return.signature()));

    let flexible_param = FunctionDecl::new("foo", DeclOrigin::Java, fx.unit()).with_param(
        "x",
        Type::flexible(Type::TypeParam(t), Type::TypeParam(t)),
    );
    assert!(is_type_param_dependent(&flexible_param.signature()));

    let declares = PropertyDecl::new("p", DeclOrigin::Source, fx.string()).with_type_params(vec![t]);
    assert!(is_type_param_dependent(&declares.signature()));

    let receiver = PropertyDecl::new("p", DeclOrigin::Source, fx.string())
        .with_receiver(Type::TypeParam(t));
    assert!(is_type_param_dependent(&receiver.signature()));
}

#[test]
fn collects_declared_then_referenced_parameters_in_order() {
    let mut fx = Fixture::new();
    let a = fx.type_param("A", fx.number());
    let b = fx.type_param("B", fx.number());
    let c = fx.type_param("C", fx.number());

    let decl = FunctionDecl::new("foo", DeclOrigin::Source, Type::TypeParam(c))
        .with_type_params(vec![b])
        .with_receiver(Type::TypeParam(a))
        .with_param("x", Type::TypeParam(b))
        .with_param("y", TypeRef::Unresolved("Missing".to_string()));

    let mut out = IndexMap::new();
    collect_type_params(&decl.signature(), &mut out);
    assert_eq!(out.keys().copied().collect::<Vec<_>>(), vec![b, c, a]);
    assert!(out.values().all(|origin| *origin == DeclOrigin::Source));
}

#[test]
fn erases_to_the_first_bound() {
    let mut fx = Fixture::new();
    // T : Number, Comparable<T>
    let t = fx.store.add_type_param("T", vec![]);
    let bounds = vec![fx.number(), fx.named("Comparable", vec![Type::TypeParam(t)])];
    fx.store.define_type_param(
        t,
        TypeParamDef {
            name: "T".to_string(),
            upper_bounds: bounds,
        },
    );

    let base = FunctionDecl::new("foo", DeclOrigin::Source, fx.unit())
        .with_type_params(vec![t])
        .with_param("x", Type::TypeParam(t));
    let candidate =
        FunctionDecl::new("foo", DeclOrigin::Java, fx.unit()).with_param("x", fx.number());

    let subst = build_erasure_substitutor(&fx.store, &candidate.signature(), &base.signature());
    assert_eq!(subst.get(t), Some(&fx.number()));
}

#[test]
fn java_type_parameters_erase_to_flexible_bounds() {
    let mut fx = Fixture::new();
    let t = fx.type_param("T", fx.number());
    let number = fx.number();
    let nullable_number = match &number {
        Type::Class(class) => Type::nullable_class(class.def, vec![]),
        _ => unreachable!(),
    };

    let candidate = FunctionDecl::new("foo", DeclOrigin::Java, fx.unit())
        .with_type_params(vec![t])
        .with_param("x", Type::TypeParam(t));
    let base = FunctionDecl::new("foo", DeclOrigin::Source, fx.unit()).with_param("x", fx.number());

    let subst = build_erasure_substitutor(&fx.store, &candidate.signature(), &base.signature());
    assert_eq!(subst.get(t), Some(&Type::flexible(number, nullable_number)));
}

#[test]
#[should_panic(expected = "has no upper bounds")]
fn type_parameter_without_bounds_is_a_precondition_violation() {
    let mut fx = Fixture::new();
    let t = fx.store.add_type_param("T", vec![]);
    let base = FunctionDecl::new("foo", DeclOrigin::Source, fx.unit()).with_type_params(vec![t]);
    let candidate = FunctionDecl::new("foo", DeclOrigin::Java, fx.unit());

    build_erasure_substitutor(&fx.store, &candidate.signature(), &base.signature());
}
