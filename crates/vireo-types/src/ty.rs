use crate::{ClassId, TypeParamId};

/// A nominal type: a class, interface or builtin applied to type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassType {
    pub def: ClassId,
    pub args: Vec<Type>,
    /// Marks the `C?` form. Only meaningful as the upper bound of a platform type; override
    /// identity ignores it.
    pub nullable: bool,
}

/// A type that is ambiguous between two bounds (platform nullability or collection mutability).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlexibleType {
    pub lower: Box<Type>,
    pub upper: Box<Type>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Class(ClassType),
    TypeParam(TypeParamId),
    Flexible(FlexibleType),
    /// Unresolvable type. Never equal to anything, including another `Error`.
    Error,
}

/// The nominal or parametric head of a type, stripped of its instantiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeConstructor {
    Class(ClassId),
    TypeParam(TypeParamId),
    Error,
}

impl Type {
    pub fn class(def: ClassId, args: Vec<Type>) -> Type {
        Type::Class(ClassType {
            def,
            args,
            nullable: false,
        })
    }

    pub fn nullable_class(def: ClassId, args: Vec<Type>) -> Type {
        Type::Class(ClassType {
            def,
            args,
            nullable: true,
        })
    }

    pub fn flexible(lower: Type, upper: Type) -> Type {
        Type::Flexible(FlexibleType {
            lower: Box::new(lower),
            upper: Box::new(upper),
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    /// Peels every flexible layer, returning the innermost lower bound.
    pub fn lower_bound_if_flexible(&self) -> &Type {
        let mut ty = self;
        while let Type::Flexible(flex) = ty {
            ty = &flex.lower;
        }
        ty
    }

    /// Returns the type parameter this type refers to once flexibility is ignored.
    pub fn as_type_param(&self) -> Option<TypeParamId> {
        match self.lower_bound_if_flexible() {
            Type::TypeParam(id) => Some(*id),
            _ => None,
        }
    }

    pub fn type_constructor(&self) -> TypeConstructor {
        match self.lower_bound_if_flexible() {
            Type::Class(class) => TypeConstructor::Class(class.def),
            Type::TypeParam(id) => TypeConstructor::TypeParam(*id),
            Type::Error | Type::Flexible(_) => TypeConstructor::Error,
        }
    }
}
