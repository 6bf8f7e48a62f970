use vireo_types::CallableDecl;

use crate::OverrideChecker;

/// Whether `candidate` could override `base` judging by names alone.
///
/// A function may stand in for a property through the property's JVM getter name (or its setter
/// name when setter matching is enabled).
pub fn names_match(candidate: &CallableDecl, base: &CallableDecl, match_setters: bool) -> bool {
    match (candidate, base) {
        (CallableDecl::Function(candidate), CallableDecl::Function(base)) => {
            candidate.name == base.name
        }
        (CallableDecl::Function(candidate), CallableDecl::Property(base)) => {
            candidate.name == base.name
                || candidate.name == base.getter_name()
                || (match_setters && candidate.name == base.setter_name())
        }
        (CallableDecl::Property(candidate), CallableDecl::Property(base)) => {
            candidate.name == base.name
        }
        (CallableDecl::Property(_), CallableDecl::Function(_)) => false,
    }
}

/// Every member of `bases` that `candidate` overrides, in the order given.
pub fn find_overridden<'b>(
    checker: &dyn OverrideChecker,
    candidate: &CallableDecl,
    bases: &'b [CallableDecl],
) -> Vec<&'b CallableDecl> {
    let match_setters = checker.options().match_setters;
    bases
        .iter()
        .filter(|base| names_match(candidate, base, match_setters))
        .filter(|base| checker.is_overridden(candidate, base))
        .collect()
}
