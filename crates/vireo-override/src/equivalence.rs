use vireo_types::{Substitutor, Type, TypeConstructor, TypeContext, TypeEnv};

/// "Same type" for override matching.
///
/// Two class types are equal when their ids agree after mapping read-only collections to their
/// mutable counterparts; type arguments are ignored unless `compare_type_arguments` is set.
/// Everything else is compared by type constructor after substitution.
#[derive(Clone, Copy)]
pub struct TypeEquivalence<'env> {
    env: &'env dyn TypeEnv,
    ctx: &'env dyn TypeContext,
    compare_type_arguments: bool,
}

impl<'env> TypeEquivalence<'env> {
    pub fn new(env: &'env dyn TypeEnv, ctx: &'env dyn TypeContext) -> Self {
        Self {
            env,
            ctx,
            compare_type_arguments: false,
        }
    }

    pub fn with_type_arguments(mut self, compare_type_arguments: bool) -> Self {
        self.compare_type_arguments = compare_type_arguments;
        self
    }

    pub fn is_equal_types(&self, candidate: &Type, base: &Type, substitutor: &Substitutor) -> bool {
        if let Type::Flexible(flex) = candidate {
            return self.is_equal_types(&flex.lower, base, substitutor);
        }
        if let Type::Flexible(flex) = base {
            return self.is_equal_types(candidate, &flex.lower, substitutor);
        }

        if let (Type::Class(candidate), Type::Class(base)) = (candidate, base) {
            let collections = self.env.collections();
            if collections.normalize(candidate.def) != collections.normalize(base.def) {
                return false;
            }
            if !self.compare_type_arguments {
                return true;
            }
            return candidate.args.len() == base.args.len()
                && candidate
                    .args
                    .iter()
                    .zip(&base.args)
                    .all(|(c, b)| self.is_equal_types(c, b, substitutor));
        }

        let candidate = substitutor.substitute_or_self(candidate).type_constructor();
        let base = substitutor.substitute_or_self(base).type_constructor();
        if candidate == TypeConstructor::Error || base == TypeConstructor::Error {
            return false;
        }
        self.ctx.are_equal_type_constructors(&candidate, &base)
    }
}
