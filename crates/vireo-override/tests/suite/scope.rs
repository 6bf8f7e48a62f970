use pretty_assertions::assert_eq;
use vireo_override::{find_overridden, JavaOverrideChecker, OverrideOptions};
use vireo_types::{CallableDecl, DeclOrigin, FunctionDecl, PropertyDecl, StructuralTypeContext};

use crate::suite::fixture::Fixture;

#[test]
fn finds_overridden_members_by_name_and_signature() {
    let fx = Fixture::new();
    let checker = JavaOverrideChecker::new(&fx.store, &StructuralTypeContext);

    let bases = vec![
        CallableDecl::from(
            FunctionDecl::new("add", DeclOrigin::Source, fx.unit()).with_param("x", fx.string()),
        ),
        CallableDecl::from(
            FunctionDecl::new("add", DeclOrigin::Source, fx.unit()).with_param("x", fx.int()),
        ),
        CallableDecl::from(PropertyDecl::new("size", DeclOrigin::Source, fx.int())),
    ];

    let add_int = CallableDecl::from(
        FunctionDecl::new("add", DeclOrigin::Java, fx.unit()).with_param("x", fx.int()),
    );
    assert_eq!(find_overridden(&checker, &add_int, &bases), vec![&bases[1]]);

    let get_size = CallableDecl::from(FunctionDecl::new("getSize", DeclOrigin::Java, fx.int()));
    assert_eq!(find_overridden(&checker, &get_size, &bases), vec![&bases[2]]);

    let remove = CallableDecl::from(
        FunctionDecl::new("remove", DeclOrigin::Java, fx.unit()).with_param("x", fx.int()),
    );
    assert!(find_overridden(&checker, &remove, &bases).is_empty());
}

#[test]
fn setter_names_are_considered_only_when_enabled() {
    let fx = Fixture::new();
    let bases = vec![CallableDecl::from(
        PropertyDecl::new("size", DeclOrigin::Source, fx.int()).with_var(true),
    )];
    let set_size = CallableDecl::from(
        FunctionDecl::new("setSize", DeclOrigin::Java, fx.unit()).with_param("value", fx.int()),
    );

    let default = JavaOverrideChecker::new(&fx.store, &StructuralTypeContext);
    assert!(find_overridden(&default, &set_size, &bases).is_empty());

    let opted_in = JavaOverrideChecker::with_options(
        &fx.store,
        &StructuralTypeContext,
        OverrideOptions {
            match_setters: true,
            ..OverrideOptions::default()
        },
    );
    assert_eq!(find_overridden(&opted_in, &set_size, &bases), vec![&bases[0]]);
}
