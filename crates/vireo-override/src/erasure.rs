//! Erasure of type parameters to their first upper bound.
//!
//! A Java declaration sees a generic signature only after erasure, so comparing it against a
//! generic base requires erasing the type parameters of both sides to a common ground.

use std::collections::HashMap;

use indexmap::IndexMap;
use vireo_types::{
    format_type, substitutor_by_map, DeclOrigin, SignatureView, Substitutor, TypeEnv, TypeParamId,
    TypeRef,
};

/// Whether the declaration declares type parameters or mentions one as a bare type in its
/// return, receiver or value parameter types.
pub fn is_type_param_dependent(sig: &SignatureView<'_>) -> bool {
    !sig.type_params.is_empty() || sig.type_refs().any(|ty| ty.is_type_param())
}

/// Appends the type parameters `sig` depends on, keeping the first origin seen for each.
pub fn collect_type_params(sig: &SignatureView<'_>, out: &mut IndexMap<TypeParamId, DeclOrigin>) {
    for id in sig.type_params {
        out.entry(*id).or_insert(sig.origin);
    }
    for id in sig.type_refs().filter_map(|ty| ty.as_type_param()) {
        out.entry(id).or_insert(sig.origin);
    }
}

/// Builds the substitutor erasing every type parameter `candidate` and `base` depend on.
///
/// Returns [`Substitutor::Empty`] when neither side depends on type parameters.
///
/// # Panics
///
/// Panics if a collected type parameter is unknown to `env` or has no upper bound; both indicate
/// a malformed declaration model.
pub fn build_erasure_substitutor(
    env: &dyn TypeEnv,
    candidate: &SignatureView<'_>,
    base: &SignatureView<'_>,
) -> Substitutor {
    if !is_type_param_dependent(candidate) && !is_type_param_dependent(base) {
        return Substitutor::Empty;
    }

    let mut params = IndexMap::new();
    collect_type_params(candidate, &mut params);
    collect_type_params(base, &mut params);

    let mut map = HashMap::with_capacity(params.len());
    for (id, origin) in params {
        let Some(def) = env.type_param(id) else {
            panic!("type parameter {id:?} is not declared in the type environment");
        };
        let Some(first_bound) = def.upper_bounds.first() else {
            panic!(
                "type parameter `{}` ({id:?}) has no upper bounds; every type parameter needs at least an implicit top bound",
                def.name
            );
        };
        let erased = TypeRef::from(first_bound.clone()).to_type(env, origin);
        tracing::trace!(
            target: "vireo.override",
            param = %def.name,
            erased = %format_type(env, &erased),
            "erasing type parameter"
        );
        map.insert(id, erased);
    }

    tracing::debug!(
        target: "vireo.override",
        params = map.len(),
        "built erasure substitutor"
    );
    substitutor_by_map(map)
}
