//! Member-override resolution.
//!
//! Given a base member of a supertype and a candidate member of a subtype, decides whether the
//! candidate overrides the base. The checks are pure functions over immutable declarations: they
//! take no locks, keep no caches and can run concurrently.
//!
//! The pieces, leaf first:
//! - [`TypeEquivalence`]: "same type" modulo flexibility and collection mutability.
//! - [`build_erasure_substitutor`]: erases type parameters of both sides to their first bound.
//! - [`JavaOverrideChecker`]: the function and property decision procedures.

#![forbid(unsafe_code)]

mod checker;
mod equivalence;
mod erasure;
mod scope;

pub use crate::checker::{JavaOverrideChecker, OverrideChecker, OverrideOptions};
pub use crate::equivalence::TypeEquivalence;
pub use crate::erasure::{build_erasure_substitutor, collect_type_params, is_type_param_dependent};
pub use crate::scope::{find_overridden, names_match};
