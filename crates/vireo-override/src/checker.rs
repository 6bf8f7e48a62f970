use serde::{Deserialize, Serialize};
use vireo_types::{
    CallableDecl, DeclOrigin, FunctionDecl, PropertyDecl, SignatureView, Substitutor, Type,
    TypeContext, TypeEnv, TypeRef,
};

use crate::equivalence::TypeEquivalence;
use crate::erasure::build_erasure_substitutor;

const TARGET: &str = "vireo.override";

/// Knobs for behavior the override rules leave open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideOptions {
    /// Also require pairwise-equal type arguments when two class types share an identity.
    pub compare_type_arguments: bool,
    /// Let a one-parameter function override a receiverless `var` property as its setter.
    pub match_setters: bool,
}

/// Decides whether a candidate member overrides a base member.
///
/// Implementations are pure: the same inputs always give the same answer and nothing is cached.
pub trait OverrideChecker {
    fn options(&self) -> OverrideOptions {
        OverrideOptions::default()
    }

    fn is_equal_types(&self, candidate: &Type, base: &Type, substitutor: &Substitutor) -> bool;

    /// Returns the substitutor under which the two signatures are compared, or `None` when their
    /// type parameters cannot be reconciled.
    fn build_type_parameters_substitutor_if_compatible(
        &self,
        candidate: &SignatureView<'_>,
        base: &SignatureView<'_>,
    ) -> Option<Substitutor>;

    fn is_overridden_function(&self, candidate: &FunctionDecl, base: &FunctionDecl) -> bool;

    fn is_overridden_property(&self, candidate: &CallableDecl, base: &PropertyDecl) -> bool;

    /// Dispatches on the shape of `base`. A function base can only be overridden by a function.
    fn is_overridden(&self, candidate: &CallableDecl, base: &CallableDecl) -> bool {
        match (candidate, base) {
            (CallableDecl::Function(candidate), CallableDecl::Function(base)) => {
                self.is_overridden_function(candidate, base)
            }
            (CallableDecl::Property(_), CallableDecl::Function(_)) => false,
            (candidate, CallableDecl::Property(base)) => {
                self.is_overridden_property(candidate, base)
            }
        }
    }
}

/// Override checker for Java-declared candidates against members of a native supertype.
///
/// Candidates carry no receiver of their own: a base receiver shows up as the candidate's first
/// value parameter.
pub struct JavaOverrideChecker<'env> {
    env: &'env dyn TypeEnv,
    equivalence: TypeEquivalence<'env>,
    options: OverrideOptions,
}

impl<'env> JavaOverrideChecker<'env> {
    pub fn new(env: &'env dyn TypeEnv, ctx: &'env dyn TypeContext) -> Self {
        Self::with_options(env, ctx, OverrideOptions::default())
    }

    pub fn with_options(
        env: &'env dyn TypeEnv,
        ctx: &'env dyn TypeContext,
        options: OverrideOptions,
    ) -> Self {
        Self {
            env,
            equivalence: TypeEquivalence::new(env, ctx)
                .with_type_arguments(options.compare_type_arguments),
            options,
        }
    }

    /// Compares two type references, converting each according to its declaration's origin.
    pub fn is_equal_type_refs(
        &self,
        candidate: &TypeRef,
        candidate_origin: DeclOrigin,
        base: &TypeRef,
        base_origin: DeclOrigin,
        substitutor: &Substitutor,
    ) -> bool {
        let candidate = candidate.to_type(self.env, candidate_origin);
        let base = base.to_type(self.env, base_origin);
        self.equivalence.is_equal_types(&candidate, &base, substitutor)
    }
}

impl OverrideChecker for JavaOverrideChecker<'_> {
    fn options(&self) -> OverrideOptions {
        self.options
    }

    fn is_equal_types(&self, candidate: &Type, base: &Type, substitutor: &Substitutor) -> bool {
        self.equivalence.is_equal_types(candidate, base, substitutor)
    }

    fn build_type_parameters_substitutor_if_compatible(
        &self,
        candidate: &SignatureView<'_>,
        base: &SignatureView<'_>,
    ) -> Option<Substitutor> {
        Some(build_erasure_substitutor(self.env, candidate, base))
    }

    fn is_overridden_function(&self, candidate: &FunctionDecl, base: &FunctionDecl) -> bool {
        if candidate.is_static != base.is_static {
            tracing::trace!(target: TARGET, name = %base.name, "static/instance mismatch");
            return false;
        }

        let base_sig = base.signature();
        let base_params: Vec<&TypeRef> = base_sig.effective_params().collect();
        if candidate.params.len() != base_params.len() {
            tracing::trace!(
                target: TARGET,
                name = %base.name,
                candidate = candidate.params.len(),
                base = base_params.len(),
                "parameter count mismatch"
            );
            return false;
        }

        let Some(substitutor) =
            self.build_type_parameters_substitutor_if_compatible(&candidate.signature(), &base_sig)
        else {
            return false;
        };

        for (idx, (param, base_ty)) in candidate.params.iter().zip(base_params).enumerate() {
            if !self.is_equal_type_refs(
                &param.ty,
                candidate.origin,
                base_ty,
                base.origin,
                &substitutor,
            ) {
                tracing::trace!(
                    target: TARGET,
                    name = %base.name,
                    position = idx,
                    "parameter type mismatch"
                );
                return false;
            }
        }

        true
    }

    fn is_overridden_property(&self, candidate: &CallableDecl, base: &PropertyDecl) -> bool {
        if base.modality.is_closed() {
            tracing::trace!(target: TARGET, name = %base.name, "base property is final");
            return false;
        }

        match candidate {
            CallableDecl::Function(function) => match &base.receiver {
                None => {
                    if function.params.is_empty() {
                        return true;
                    }
                    self.options.match_setters
                        && base.is_var
                        && function.params.len() == 1
                        && self.is_equal_type_refs(
                            &function.params[0].ty,
                            function.origin,
                            &base.return_type,
                            base.origin,
                            &Substitutor::Empty,
                        )
                }
                Some(receiver) => {
                    if function.params.len() != 1 {
                        return false;
                    }
                    self.is_equal_type_refs(
                        receiver,
                        base.origin,
                        &function.params[0].ty,
                        function.origin,
                        &Substitutor::Empty,
                    )
                }
            },
            CallableDecl::Property(property) => match (&base.receiver, &property.receiver) {
                (None, None) => true,
                (None, Some(_)) | (Some(_), None) => {
                    tracing::trace!(target: TARGET, name = %base.name, "receiver presence mismatch");
                    false
                }
                (Some(base_receiver), Some(receiver)) => self.is_equal_type_refs(
                    base_receiver,
                    base.origin,
                    receiver,
                    property.origin,
                    &Substitutor::Empty,
                ),
            },
        }
    }
}
