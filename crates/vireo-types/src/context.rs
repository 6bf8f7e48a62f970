use crate::TypeConstructor;

/// Type-constructor equality oracle.
///
/// The override checker delegates the fallback comparison of substituted types to this trait so
/// hosts can plug in their own notion of constructor identity.
pub trait TypeContext {
    fn are_equal_type_constructors(&self, a: &TypeConstructor, b: &TypeConstructor) -> bool;
}

/// Nominal constructor identity: equal class ids or equal type parameters.
///
/// `TypeConstructor::Error` is never equal to anything, itself included.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralTypeContext;

impl TypeContext for StructuralTypeContext {
    fn are_equal_type_constructors(&self, a: &TypeConstructor, b: &TypeConstructor) -> bool {
        match (a, b) {
            (TypeConstructor::Error, _) | (_, TypeConstructor::Error) => false,
            (a, b) => a == b,
        }
    }
}
