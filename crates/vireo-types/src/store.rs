use std::collections::{HashMap, HashSet, VecDeque};

use crate::collections::COLLECTION_PAIRS;
use crate::{substitutor_by_map, ClassId, CollectionMapping, Substitutor, Type, TypeParamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    pub name: String,
    pub kind: ClassKind,
    pub type_params: Vec<TypeParamId>,
    pub supertypes: Vec<Type>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            type_params: Vec::new(),
            supertypes: Vec::new(),
        }
    }
}

/// A declared type parameter.
///
/// `upper_bounds` is ordered as written and is never empty for a well-formed declaration: an
/// unbounded parameter carries the implicit `Any?` bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParamDef {
    pub name: String,
    pub upper_bounds: Vec<Type>,
}

/// Ids of builtins the override machinery and its tests refer to directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellKnownTypes {
    pub any: ClassId,
    pub unit: ClassId,
    pub number: ClassId,
    pub int: ClassId,
    pub string: ClassId,
    pub comparable: ClassId,
}

/// Read-only view over declared classes and type parameters.
///
/// This is the symbol/declaration provider consumed by the override checker; it never mutates.
pub trait TypeEnv {
    fn class(&self, id: ClassId) -> Option<&ClassDef>;
    fn type_param(&self, id: TypeParamId) -> Option<&TypeParamDef>;
    fn class_id(&self, name: &str) -> Option<ClassId>;
    fn well_known(&self) -> &WellKnownTypes;
    fn collections(&self) -> &CollectionMapping;
}

/// Owning storage for classes and type parameters.
#[derive(Debug, Clone)]
pub struct TypeStore {
    classes: Vec<Option<ClassDef>>,
    class_by_name: HashMap<String, ClassId>,
    type_params: Vec<TypeParamDef>,
    collections: CollectionMapping,
    well_known: WellKnownTypes,
}

impl Default for TypeStore {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl TypeStore {
    /// Creates a store pre-populated with the builtin scalar types and the collection interfaces.
    pub fn with_builtins() -> Self {
        let placeholder = WellKnownTypes {
            any: ClassId(0),
            unit: ClassId(0),
            number: ClassId(0),
            int: ClassId(0),
            string: ClassId(0),
            comparable: ClassId(0),
        };
        let mut store = Self {
            classes: Vec::new(),
            class_by_name: HashMap::new(),
            type_params: Vec::new(),
            collections: CollectionMapping::new(),
            well_known: placeholder,
        };

        let any = store.add_class(ClassDef::new("kotlin.Any", ClassKind::Class));
        let any_type = Type::class(any, vec![]);
        let nullable_any = Type::nullable_class(any, vec![]);

        let comparable_t = store.add_type_param("T", vec![nullable_any.clone()]);
        let comparable = store.add_class(ClassDef {
            name: "kotlin.Comparable".to_string(),
            kind: ClassKind::Interface,
            type_params: vec![comparable_t],
            supertypes: vec![any_type.clone()],
        });

        let unit = store.add_class(ClassDef {
            supertypes: vec![any_type.clone()],
            ..ClassDef::new("kotlin.Unit", ClassKind::Class)
        });
        let number = store.add_class(ClassDef {
            supertypes: vec![any_type.clone()],
            ..ClassDef::new("kotlin.Number", ClassKind::Class)
        });

        // Self-referential supertypes (`Int : Comparable<Int>`) need the id before the def.
        let int = store.intern_class_id("kotlin.Int");
        store.define_class(
            int,
            ClassDef {
                supertypes: vec![
                    Type::class(number, vec![]),
                    Type::class(comparable, vec![Type::class(int, vec![])]),
                ],
                ..ClassDef::new("kotlin.Int", ClassKind::Class)
            },
        );
        let string = store.intern_class_id("kotlin.String");
        store.define_class(
            string,
            ClassDef {
                supertypes: vec![
                    any_type.clone(),
                    Type::class(comparable, vec![Type::class(string, vec![])]),
                ],
                ..ClassDef::new("kotlin.String", ClassKind::Class)
            },
        );

        store.well_known = WellKnownTypes {
            any,
            unit,
            number,
            int,
            string,
            comparable,
        };

        for (read_only, mutable) in COLLECTION_PAIRS {
            let arity = if read_only.contains("Map") { 2 } else { 1 };
            let read_only_id = store.add_collection_interface(read_only, arity, None);
            let mutable_id = store.add_collection_interface(mutable, arity, Some(read_only_id));
            store.collections.insert(read_only_id, mutable_id);
        }

        store
    }

    fn add_collection_interface(
        &mut self,
        name: &str,
        arity: usize,
        read_only: Option<ClassId>,
    ) -> ClassId {
        let nullable_any = Type::nullable_class(self.well_known.any, vec![]);
        let names: &[&str] = if arity == 2 { &["K", "V"] } else { &["E"] };
        let type_params: Vec<TypeParamId> = names
            .iter()
            .map(|name| self.add_type_param(*name, vec![nullable_any.clone()]))
            .collect();

        let supertypes = match read_only {
            Some(read_only) => vec![Type::class(
                read_only,
                type_params.iter().copied().map(Type::TypeParam).collect(),
            )],
            None => vec![Type::class(self.well_known.any, vec![])],
        };

        self.add_class(ClassDef {
            name: name.to_string(),
            kind: ClassKind::Interface,
            type_params,
            supertypes,
        })
    }

    /// Returns the id for `name`, allocating an undefined placeholder on first use.
    pub fn intern_class_id(&mut self, name: &str) -> ClassId {
        if let Some(id) = self.class_by_name.get(name) {
            return *id;
        }
        let raw: u32 = self
            .classes
            .len()
            .try_into()
            .expect("too many classes in type store");
        let id = ClassId(raw);
        self.classes.push(None);
        self.class_by_name.insert(name.to_string(), id);
        id
    }

    /// Installs `def` for `id`, overwriting any placeholder or previous definition.
    pub fn define_class(&mut self, id: ClassId, def: ClassDef) {
        let idx = id.0 as usize;
        if idx >= self.classes.len() {
            self.classes.resize(idx + 1, None);
        }
        self.class_by_name.insert(def.name.clone(), id);
        self.classes[idx] = Some(def);
    }

    pub fn add_class(&mut self, def: ClassDef) -> ClassId {
        let id = self.intern_class_id(&def.name);
        self.define_class(id, def);
        id
    }

    pub fn add_type_param(&mut self, name: impl Into<String>, upper_bounds: Vec<Type>) -> TypeParamId {
        let raw: u32 = self
            .type_params
            .len()
            .try_into()
            .expect("too many type parameters in type store");
        self.type_params.push(TypeParamDef {
            name: name.into(),
            upper_bounds,
        });
        TypeParamId(raw)
    }

    /// Replaces the definition of an already allocated type parameter.
    ///
    /// Used for two-pass construction where bounds refer back to the parameter itself
    /// (`T : Comparable<T>`).
    pub fn define_type_param(&mut self, id: TypeParamId, def: TypeParamDef) {
        if let Some(slot) = self.type_params.get_mut(id.0 as usize) {
            *slot = def;
        }
    }

    /// All classes reachable through declared supertypes, excluding `id` itself, in breadth-first
    /// order.
    pub fn supertype_closure(&self, id: ClassId) -> Vec<ClassId> {
        self.supertype_substitutors(id)
            .into_iter()
            .map(|(id, _)| id)
            .collect()
    }

    /// [`Self::supertype_closure`], each supertype paired with the substitutor mapping its own
    /// type parameters to the arguments `id` instantiates it with, composed along the path.
    ///
    /// A supertype written without arguments (raw) leaves its parameters unmapped. When a class
    /// is reachable along several paths, the first one in breadth-first order wins.
    pub fn supertype_substitutors(&self, id: ClassId) -> Vec<(ClassId, Substitutor)> {
        let mut out = Vec::new();
        let mut seen: HashSet<ClassId> = HashSet::new();
        let mut queue: VecDeque<(ClassId, Substitutor)> = VecDeque::new();
        seen.insert(id);
        queue.push_back((id, Substitutor::Empty));

        while let Some((current, substitutor)) = queue.pop_front() {
            let Some(def) = self.class(current) else {
                continue;
            };
            for supertype in &def.supertypes {
                let Type::Class(class) = supertype.lower_bound_if_flexible() else {
                    continue;
                };
                if !seen.insert(class.def) {
                    continue;
                }
                let params = self
                    .class(class.def)
                    .map_or(&[][..], |super_def| super_def.type_params.as_slice());
                let map: HashMap<TypeParamId, Type> = if class.args.len() == params.len() {
                    params
                        .iter()
                        .copied()
                        .zip(class.args.iter().map(|arg| substitutor.substitute_or_self(arg)))
                        .collect()
                } else {
                    HashMap::new()
                };
                let next = substitutor_by_map(map);
                out.push((class.def, next.clone()));
                queue.push_back((class.def, next));
            }
        }

        out
    }
}

impl TypeEnv for TypeStore {
    fn class(&self, id: ClassId) -> Option<&ClassDef> {
        self.classes.get(id.0 as usize).and_then(Option::as_ref)
    }

    fn type_param(&self, id: TypeParamId) -> Option<&TypeParamDef> {
        self.type_params.get(id.0 as usize)
    }

    fn class_id(&self, name: &str) -> Option<ClassId> {
        self.class_by_name.get(name).copied()
    }

    fn well_known(&self) -> &WellKnownTypes {
        &self.well_known
    }

    fn collections(&self) -> &CollectionMapping {
        &self.collections
    }
}
