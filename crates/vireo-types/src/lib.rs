//! Type model shared by the vireo crates.
//!
//! Types are plain values ([`Type`]) that refer to classes and type parameters owned by a
//! [`TypeStore`]. Consumers only read the store through [`TypeEnv`].

#![forbid(unsafe_code)]

mod collections;
mod context;
pub mod decl;
mod format;
mod ids;
mod store;
mod subst;
mod ty;

pub use crate::collections::{CollectionMapping, COLLECTION_PAIRS};
pub use crate::context::{StructuralTypeContext, TypeContext};
pub use crate::decl::{
    CallableDecl, DeclOrigin, FunctionDecl, Modality, PropertyDecl, SignatureView, TypeRef,
    ValueParam,
};
pub use crate::format::{format_type, TypeDisplay};
pub use crate::ids::{ClassId, TypeParamId};
pub use crate::store::{ClassDef, ClassKind, TypeEnv, TypeParamDef, TypeStore, WellKnownTypes};
pub use crate::subst::{substitutor_by_map, Substitutor};
pub use crate::ty::{ClassType, FlexibleType, Type, TypeConstructor};
