//! JSON hierarchy models consumed by `vireo check`.
//!
//! ```json
//! {
//!   "classes": [
//!     { "name": "Base", "type_params": [{ "name": "T" }],
//!       "functions": [{ "name": "put", "params": [{ "name": "value", "type": "T" }] }],
//!       "properties": [{ "name": "size", "type": "Int", "var": true }] },
//!     { "name": "Impl", "origin": "java", "supertypes": ["Base<String>"],
//!       "functions": [{ "name": "getSize", "returns": "Int" }] }
//!   ]
//! }
//! ```
//!
//! Type strings are `Name`, `Name<Arg, ..>` and `Name?`. A name resolves to a type parameter in
//! scope first, then to a class by its exact name, then under `kotlin.` and
//! `kotlin.collections.`.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use vireo_types::{
    CallableDecl, ClassDef, ClassId, ClassKind, DeclOrigin, FunctionDecl, Modality, PropertyDecl,
    Type, TypeEnv, TypeParamDef, TypeParamId, TypeStore,
};

const CLASS_PREFIXES: &[&str] = &["", "kotlin.", "kotlin.collections."];

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid model json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate class `{0}`")]
    DuplicateClass(String),
    #[error("unknown type `{name}` in {context}")]
    UnknownType { name: String, context: String },
    #[error("`{name}` expects {expected} type argument(s), found {found} in {context}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        context: String,
    },
    #[error("malformed type `{text}` in {context}: {reason}")]
    Syntax {
        text: String,
        reason: String,
        context: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModelFile {
    #[serde(default)]
    classes: Vec<RawClass>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawClass {
    name: String,
    #[serde(default)]
    origin: DeclOrigin,
    #[serde(default)]
    interface: bool,
    #[serde(default)]
    type_params: Vec<RawTypeParam>,
    #[serde(default)]
    supertypes: Vec<String>,
    #[serde(default)]
    functions: Vec<RawFunction>,
    #[serde(default)]
    properties: Vec<RawProperty>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTypeParam {
    name: String,
    /// Empty means the implicit `Any?` bound.
    #[serde(default)]
    bounds: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFunction {
    name: String,
    #[serde(default)]
    type_params: Vec<RawTypeParam>,
    #[serde(default)]
    receiver: Option<String>,
    #[serde(default)]
    params: Vec<RawParam>,
    #[serde(default = "unit_type_name")]
    returns: String,
    #[serde(default, rename = "static")]
    is_static: bool,
    #[serde(default)]
    modality: Modality,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawParam {
    name: String,
    #[serde(rename = "type")]
    ty: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProperty {
    name: String,
    #[serde(default)]
    type_params: Vec<RawTypeParam>,
    #[serde(default)]
    receiver: Option<String>,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default, rename = "var")]
    is_var: bool,
    #[serde(default, rename = "static")]
    is_static: bool,
    #[serde(default)]
    modality: Modality,
}

fn unit_type_name() -> String {
    "Unit".to_string()
}

/// A loaded hierarchy: the type store plus the members of every declared class.
#[derive(Debug)]
pub struct Model {
    pub store: TypeStore,
    pub classes: Vec<ModelClass>,
}

#[derive(Debug, Clone)]
pub struct ModelClass {
    pub id: ClassId,
    pub name: String,
    pub members: Vec<CallableDecl>,
}

impl Model {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }

    pub fn load_from_str(text: &str) -> Result<Self, ModelError> {
        let file: ModelFile = serde_json::from_str(text)?;
        build_model(file)
    }

    pub fn class(&self, id: ClassId) -> Option<&ModelClass> {
        self.classes.iter().find(|class| class.id == id)
    }

    pub fn class_by_name(&self, name: &str) -> Option<&ModelClass> {
        self.classes.iter().find(|class| class.name == name)
    }

    pub fn member_count(&self) -> usize {
        self.classes.iter().map(|class| class.members.len()).sum()
    }
}

/// Type parameters visible at some point, innermost last.
type Scope = Vec<(String, TypeParamId)>;

fn build_model(file: ModelFile) -> Result<Model, ModelError> {
    let mut store = TypeStore::with_builtins();

    // Claim every class name first so supertypes and members may refer to classes declared later.
    let mut scopes: Vec<(ClassId, Scope)> = Vec::with_capacity(file.classes.len());
    for class in &file.classes {
        if store.class_id(&class.name).is_some() {
            return Err(ModelError::DuplicateClass(class.name.clone()));
        }
        let scope = declare_type_params(&mut store, &class.type_params);
        let id = store.add_class(class_def(class, &scope, Vec::new()));
        scopes.push((id, scope));
    }

    for (class, (id, scope)) in file.classes.iter().zip(&scopes) {
        let context = format!("class `{}`", class.name);
        define_bounds(&mut store, &class.type_params, scope, scope, &context)?;
        let supertypes = class
            .supertypes
            .iter()
            .map(|text| resolve_type(&store, scope, text, &context))
            .collect::<Result<Vec<_>, _>>()?;
        store.define_class(*id, class_def(class, scope, supertypes));
    }

    let mut classes = Vec::with_capacity(file.classes.len());
    for (class, (id, scope)) in file.classes.iter().zip(&scopes) {
        let mut members = Vec::with_capacity(class.functions.len() + class.properties.len());
        for function in &class.functions {
            members.push(build_function(&mut store, class, scope, function)?.into());
        }
        for property in &class.properties {
            members.push(build_property(&mut store, class, scope, property)?.into());
        }
        classes.push(ModelClass {
            id: *id,
            name: class.name.clone(),
            members,
        });
    }

    tracing::debug!(
        target: "vireo.cli",
        classes = classes.len(),
        "loaded hierarchy model"
    );
    Ok(Model { store, classes })
}

fn class_def(class: &RawClass, scope: &Scope, supertypes: Vec<Type>) -> ClassDef {
    let kind = if class.interface {
        ClassKind::Interface
    } else {
        ClassKind::Class
    };
    ClassDef {
        type_params: scope.iter().map(|(_, id)| *id).collect(),
        supertypes,
        ..ClassDef::new(class.name.clone(), kind)
    }
}

/// Allocates the parameters with placeholder bounds; [`define_bounds`] fills them in once every
/// name they may mention is known.
fn declare_type_params(store: &mut TypeStore, raw_params: &[RawTypeParam]) -> Scope {
    raw_params
        .iter()
        .map(|raw| (raw.name.clone(), store.add_type_param(raw.name.clone(), Vec::new())))
        .collect()
}

fn define_bounds(
    store: &mut TypeStore,
    raw_params: &[RawTypeParam],
    declared: &[(String, TypeParamId)],
    scope: &[(String, TypeParamId)],
    context: &str,
) -> Result<(), ModelError> {
    for (raw, (_, id)) in raw_params.iter().zip(declared) {
        let upper_bounds = if raw.bounds.is_empty() {
            vec![Type::nullable_class(store.well_known().any, Vec::new())]
        } else {
            raw.bounds
                .iter()
                .map(|text| resolve_type(store, scope, text, context))
                .collect::<Result<Vec<_>, _>>()?
        };
        store.define_type_param(
            *id,
            TypeParamDef {
                name: raw.name.clone(),
                upper_bounds,
            },
        );
    }
    Ok(())
}

fn member_scope(
    store: &mut TypeStore,
    class_scope: &Scope,
    raw_params: &[RawTypeParam],
    context: &str,
) -> Result<(Scope, Vec<TypeParamId>), ModelError> {
    let declared = declare_type_params(store, raw_params);
    let mut scope = class_scope.clone();
    scope.extend(declared.iter().cloned());
    define_bounds(store, raw_params, &declared, &scope, context)?;
    let ids = declared.into_iter().map(|(_, id)| id).collect();
    Ok((scope, ids))
}

fn build_function(
    store: &mut TypeStore,
    class: &RawClass,
    class_scope: &Scope,
    raw: &RawFunction,
) -> Result<FunctionDecl, ModelError> {
    let context = format!("`{}.{}`", class.name, raw.name);
    let (scope, type_params) = member_scope(store, class_scope, &raw.type_params, &context)?;

    let return_type = resolve_type(store, &scope, &raw.returns, &context)?;
    let mut decl = FunctionDecl::new(raw.name.clone(), class.origin, return_type)
        .with_type_params(type_params)
        .with_static(raw.is_static)
        .with_modality(raw.modality);
    if let Some(receiver) = &raw.receiver {
        decl = decl.with_receiver(resolve_type(store, &scope, receiver, &context)?);
    }
    for param in &raw.params {
        decl = decl.with_param(
            param.name.clone(),
            resolve_type(store, &scope, &param.ty, &context)?,
        );
    }
    Ok(decl)
}

fn build_property(
    store: &mut TypeStore,
    class: &RawClass,
    class_scope: &Scope,
    raw: &RawProperty,
) -> Result<PropertyDecl, ModelError> {
    let context = format!("`{}.{}`", class.name, raw.name);
    let (scope, type_params) = member_scope(store, class_scope, &raw.type_params, &context)?;

    let ty = resolve_type(store, &scope, &raw.ty, &context)?;
    let mut decl = PropertyDecl::new(raw.name.clone(), class.origin, ty)
        .with_type_params(type_params)
        .with_var(raw.is_var)
        .with_static(raw.is_static)
        .with_modality(raw.modality);
    if let Some(receiver) = &raw.receiver {
        decl = decl.with_receiver(resolve_type(store, &scope, receiver, &context)?);
    }
    Ok(decl)
}

fn resolve_type(
    store: &TypeStore,
    scope: &[(String, TypeParamId)],
    text: &str,
    context: &str,
) -> Result<Type, ModelError> {
    let expr = parse_type_expr(text).map_err(|reason| ModelError::Syntax {
        text: text.to_string(),
        reason,
        context: context.to_string(),
    })?;
    resolve_expr(store, scope, &expr, context)
}

fn resolve_expr(
    store: &TypeStore,
    scope: &[(String, TypeParamId)],
    expr: &TypeExpr,
    context: &str,
) -> Result<Type, ModelError> {
    // Type parameters carry no nullability of their own; `T?` resolves to `T`.
    if let Some((_, id)) = scope.iter().rev().find(|(name, _)| *name == expr.name) {
        if !expr.args.is_empty() {
            return Err(ModelError::ArityMismatch {
                name: expr.name.clone(),
                expected: 0,
                found: expr.args.len(),
                context: context.to_string(),
            });
        }
        return Ok(Type::TypeParam(*id));
    }

    let id = CLASS_PREFIXES
        .iter()
        .find_map(|prefix| store.class_id(&format!("{prefix}{}", expr.name)))
        .ok_or_else(|| ModelError::UnknownType {
            name: expr.name.clone(),
            context: context.to_string(),
        })?;

    // A class used without arguments is taken as a raw type.
    let expected = store.class(id).map_or(0, |def| def.type_params.len());
    if !expr.args.is_empty() && expr.args.len() != expected {
        return Err(ModelError::ArityMismatch {
            name: expr.name.clone(),
            expected,
            found: expr.args.len(),
            context: context.to_string(),
        });
    }

    let args = expr
        .args
        .iter()
        .map(|arg| resolve_expr(store, scope, arg, context))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(if expr.nullable {
        Type::nullable_class(id, args)
    } else {
        Type::class(id, args)
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TypeExpr {
    name: String,
    args: Vec<TypeExpr>,
    nullable: bool,
}

fn parse_type_expr(text: &str) -> Result<TypeExpr, String> {
    let mut parser = TypeParser { text, pos: 0 };
    let expr = parser.parse_type()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(expr),
        Some(c) => Err(format!("unexpected `{c}` at offset {}", parser.pos)),
    }
}

struct TypeParser<'a> {
    text: &'a str,
    pos: usize,
}

impl TypeParser<'_> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn parse_type(&mut self) -> Result<TypeExpr, String> {
        self.skip_whitespace();
        let start = self.pos;
        while self.peek().is_some_and(is_name_char) {
            self.bump();
        }
        if start == self.pos {
            return Err(match self.peek() {
                Some(c) => format!("expected a type name, found `{c}`"),
                None => "expected a type name".to_string(),
            });
        }
        let name = self.text[start..self.pos].to_string();

        let mut args = Vec::new();
        if self.eat('<') {
            loop {
                args.push(self.parse_type()?);
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(format!("expected `,` or `>` at offset {}", self.pos));
            }
        }

        let nullable = self.eat('?');
        Ok(TypeExpr {
            name,
            args,
            nullable,
        })
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '$')
}
