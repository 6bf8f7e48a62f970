//! Callable declarations as seen by override checking.
//!
//! Declarations only reference types through [`TypeRef`]; converting a reference into a [`Type`]
//! depends on where the declaration came from (see [`TypeRef::to_type`]).

use serde::{Deserialize, Serialize};

use crate::{ClassType, Substitutor, Type, TypeEnv, TypeParamId};

/// Where a declaration was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclOrigin {
    /// Declared in native source; types are exactly as written.
    #[default]
    Source,
    /// Declared in Java; nullability and collection mutability are unknown.
    Java,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Final,
    #[default]
    Open,
    Abstract,
}

impl Modality {
    /// Closed declarations can never be overridden.
    pub fn is_closed(self) -> bool {
        matches!(self, Modality::Final)
    }
}

/// A type reference attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Resolved(Type),
    /// A reference resolution gave up on; converts to [`Type::Error`].
    Unresolved(String),
}

impl TypeRef {
    pub fn resolved_type(&self) -> Option<&Type> {
        match self {
            TypeRef::Resolved(ty) => Some(ty),
            TypeRef::Unresolved(_) => None,
        }
    }

    /// Whether this reference is a bare type parameter once flexibility is ignored.
    pub fn is_type_param(&self) -> bool {
        self.as_type_param().is_some()
    }

    pub fn as_type_param(&self) -> Option<TypeParamId> {
        self.resolved_type().and_then(Type::as_type_param)
    }

    /// Converts the reference into the type model.
    ///
    /// References on Java declarations become flexible: `C<..>` turns into
    /// `(C'<..>..C<..>?)` where `C'` is the mutable view of a read-only collection `C`.
    pub fn to_type(&self, env: &dyn TypeEnv, origin: DeclOrigin) -> Type {
        let Some(ty) = self.resolved_type() else {
            return Type::Error;
        };
        match origin {
            DeclOrigin::Source => ty.clone(),
            DeclOrigin::Java => probably_flexible(env, ty),
        }
    }

    /// Rewrites a resolved reference with `substitutor`; unresolved references are kept as is.
    pub fn substitute(&self, substitutor: &Substitutor) -> TypeRef {
        match self {
            TypeRef::Resolved(ty) => TypeRef::Resolved(substitutor.substitute_or_self(ty)),
            TypeRef::Unresolved(_) => self.clone(),
        }
    }
}

impl From<Type> for TypeRef {
    fn from(ty: Type) -> Self {
        TypeRef::Resolved(ty)
    }
}

fn probably_flexible(env: &dyn TypeEnv, ty: &Type) -> Type {
    match ty {
        Type::Class(class) => {
            let args: Vec<Type> = class
                .args
                .iter()
                .map(|arg| probably_flexible(env, arg))
                .collect();
            let collections = env.collections();
            let lower_def = collections.normalize(class.def);
            let upper_def = collections
                .mutable_to_read_only(lower_def)
                .unwrap_or(class.def);
            Type::flexible(
                Type::Class(ClassType {
                    def: lower_def,
                    args: args.clone(),
                    nullable: false,
                }),
                Type::Class(ClassType {
                    def: upper_def,
                    args,
                    nullable: true,
                }),
            )
        }
        Type::TypeParam(id) => Type::flexible(Type::TypeParam(*id), Type::TypeParam(*id)),
        Type::Flexible(_) | Type::Error => ty.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueParam {
    pub name: String,
    pub ty: TypeRef,
}

impl ValueParam {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// The parts of a declaration's signature override checking compares.
///
/// Borrowed from the declaration and rebuilt on every check; never cached.
#[derive(Debug, Clone, Copy)]
pub struct SignatureView<'a> {
    pub origin: DeclOrigin,
    pub type_params: &'a [TypeParamId],
    pub receiver: Option<&'a TypeRef>,
    pub params: &'a [ValueParam],
    pub return_type: &'a TypeRef,
}

impl<'a> SignatureView<'a> {
    /// `[receiver?] + value parameter types`, in declaration order.
    pub fn effective_params(&self) -> impl Iterator<Item = &'a TypeRef> + 'a {
        self.receiver
            .into_iter()
            .chain(self.params.iter().map(|param| &param.ty))
    }

    /// Every type reference in the signature: return, receiver, then value parameters.
    pub fn type_refs(&self) -> impl Iterator<Item = &'a TypeRef> + 'a {
        std::iter::once(self.return_type)
            .chain(self.receiver)
            .chain(self.params.iter().map(|param| &param.ty))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: String,
    pub origin: DeclOrigin,
    pub type_params: Vec<TypeParamId>,
    pub receiver: Option<TypeRef>,
    pub params: Vec<ValueParam>,
    pub return_type: TypeRef,
    pub is_static: bool,
    pub modality: Modality,
}

impl FunctionDecl {
    /// An open, non-static, parameterless function returning `return_type`.
    pub fn new(name: impl Into<String>, origin: DeclOrigin, return_type: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            origin,
            type_params: Vec::new(),
            receiver: None,
            params: Vec::new(),
            return_type: return_type.into(),
            is_static: false,
            modality: Modality::Open,
        }
    }

    pub fn with_type_params(mut self, type_params: Vec<TypeParamId>) -> Self {
        self.type_params = type_params;
        self
    }

    pub fn with_receiver(mut self, receiver: impl Into<TypeRef>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        self.params.push(ValueParam::new(name, ty));
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_modality(mut self, modality: Modality) -> Self {
        self.modality = modality;
        self
    }

    pub fn signature(&self) -> SignatureView<'_> {
        SignatureView {
            origin: self.origin,
            type_params: &self.type_params,
            receiver: self.receiver.as_ref(),
            params: &self.params,
            return_type: &self.return_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl {
    pub name: String,
    pub origin: DeclOrigin,
    pub type_params: Vec<TypeParamId>,
    pub receiver: Option<TypeRef>,
    pub return_type: TypeRef,
    pub is_static: bool,
    /// `var` rather than `val`.
    pub is_var: bool,
    pub modality: Modality,
}

impl PropertyDecl {
    /// An open, non-static, read-only property of type `ty`.
    pub fn new(name: impl Into<String>, origin: DeclOrigin, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            origin,
            type_params: Vec::new(),
            receiver: None,
            return_type: ty.into(),
            is_static: false,
            is_var: false,
            modality: Modality::Open,
        }
    }

    pub fn with_type_params(mut self, type_params: Vec<TypeParamId>) -> Self {
        self.type_params = type_params;
        self
    }

    pub fn with_receiver(mut self, receiver: impl Into<TypeRef>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    pub fn with_var(mut self, is_var: bool) -> Self {
        self.is_var = is_var;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_modality(mut self, modality: Modality) -> Self {
        self.modality = modality;
        self
    }

    pub fn signature(&self) -> SignatureView<'_> {
        SignatureView {
            origin: self.origin,
            type_params: &self.type_params,
            receiver: self.receiver.as_ref(),
            params: &[],
            return_type: &self.return_type,
        }
    }

    /// JVM name of the getter: `foo` -> `getFoo`, `isOpen` -> `isOpen`.
    pub fn getter_name(&self) -> String {
        if has_is_prefix(&self.name) {
            return self.name.clone();
        }
        format!("get{}", capitalize(&self.name))
    }

    /// JVM name of the setter: `foo` -> `setFoo`, `isOpen` -> `setOpen`.
    pub fn setter_name(&self) -> String {
        if has_is_prefix(&self.name) {
            return format!("set{}", &self.name[2..]);
        }
        format!("set{}", capitalize(&self.name))
    }
}

fn has_is_prefix(name: &str) -> bool {
    name.strip_prefix("is")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Declaration shapes the override checker distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallableDecl {
    Function(FunctionDecl),
    Property(PropertyDecl),
}

impl CallableDecl {
    pub fn name(&self) -> &str {
        match self {
            CallableDecl::Function(f) => &f.name,
            CallableDecl::Property(p) => &p.name,
        }
    }

    pub fn origin(&self) -> DeclOrigin {
        match self {
            CallableDecl::Function(f) => f.origin,
            CallableDecl::Property(p) => p.origin,
        }
    }

    /// Value parameters; always empty for properties.
    pub fn value_params(&self) -> &[ValueParam] {
        match self {
            CallableDecl::Function(f) => &f.params,
            CallableDecl::Property(_) => &[],
        }
    }

    pub fn signature(&self) -> SignatureView<'_> {
        match self {
            CallableDecl::Function(f) => f.signature(),
            CallableDecl::Property(p) => p.signature(),
        }
    }

    /// The declaration as seen through a supertype instantiation: receiver, value parameter and
    /// return types rewritten by `substitutor`. The member's own type parameters are untouched.
    pub fn substitute(&self, substitutor: &Substitutor) -> CallableDecl {
        if substitutor.is_empty() {
            return self.clone();
        }
        let receiver = self.receiver_ref().map(|ty| ty.substitute(substitutor));
        match self {
            CallableDecl::Function(f) => CallableDecl::Function(FunctionDecl {
                receiver,
                params: f
                    .params
                    .iter()
                    .map(|param| {
                        ValueParam::new(param.name.clone(), param.ty.substitute(substitutor))
                    })
                    .collect(),
                return_type: f.return_type.substitute(substitutor),
                ..f.clone()
            }),
            CallableDecl::Property(p) => CallableDecl::Property(PropertyDecl {
                receiver,
                return_type: p.return_type.substitute(substitutor),
                ..p.clone()
            }),
        }
    }

    fn receiver_ref(&self) -> Option<&TypeRef> {
        match self {
            CallableDecl::Function(f) => f.receiver.as_ref(),
            CallableDecl::Property(p) => p.receiver.as_ref(),
        }
    }
}

impl From<FunctionDecl> for CallableDecl {
    fn from(decl: FunctionDecl) -> Self {
        CallableDecl::Function(decl)
    }
}

impl From<PropertyDecl> for CallableDecl {
    fn from(decl: PropertyDecl) -> Self {
        CallableDecl::Property(decl)
    }
}
