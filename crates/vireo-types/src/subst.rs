use std::collections::HashMap;

use crate::{ClassType, FlexibleType, Type, TypeParamId};

/// Immutable mapping from type parameters to replacement types.
///
/// Parameters missing from the map pass through unchanged. Class identities are never rewritten,
/// only their arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Substitutor {
    /// Identity substitution. Never allocates.
    #[default]
    Empty,
    Map(HashMap<TypeParamId, Type>),
}

/// Builds a map-backed substitutor, collapsing an empty map to [`Substitutor::Empty`].
pub fn substitutor_by_map(map: HashMap<TypeParamId, Type>) -> Substitutor {
    if map.is_empty() {
        Substitutor::Empty
    } else {
        Substitutor::Map(map)
    }
}

impl Substitutor {
    pub fn is_empty(&self) -> bool {
        matches!(self, Substitutor::Empty)
    }

    pub fn get(&self, id: TypeParamId) -> Option<&Type> {
        match self {
            Substitutor::Empty => None,
            Substitutor::Map(map) => map.get(&id),
        }
    }

    /// Rewrites `ty`, returning `None` when nothing in the tree changed.
    pub fn substitute(&self, ty: &Type) -> Option<Type> {
        let Substitutor::Map(map) = self else {
            return None;
        };
        substitute_in(map, ty)
    }

    pub fn substitute_or_self(&self, ty: &Type) -> Type {
        self.substitute(ty).unwrap_or_else(|| ty.clone())
    }
}

fn substitute_in(map: &HashMap<TypeParamId, Type>, ty: &Type) -> Option<Type> {
    match ty {
        Type::TypeParam(id) => map.get(id).cloned(),
        Type::Class(class) => {
            let mut changed = false;
            let args: Vec<Type> = class
                .args
                .iter()
                .map(|arg| match substitute_in(map, arg) {
                    Some(new) => {
                        changed = true;
                        new
                    }
                    None => arg.clone(),
                })
                .collect();
            changed.then(|| {
                Type::Class(ClassType {
                    def: class.def,
                    args,
                    nullable: class.nullable,
                })
            })
        }
        Type::Flexible(flex) => {
            let lower = substitute_in(map, &flex.lower);
            let upper = substitute_in(map, &flex.upper);
            if lower.is_none() && upper.is_none() {
                return None;
            }
            Some(Type::Flexible(FlexibleType {
                lower: Box::new(lower.unwrap_or_else(|| (*flex.lower).clone())),
                upper: Box::new(upper.unwrap_or_else(|| (*flex.upper).clone())),
            }))
        }
        Type::Error => None,
    }
}
