//! Type registry and registration builders
//!
//! The registry is the crate's type-metadata provider: callers register
//! types through [`TypeBuilder`] and every query and copy operation takes
//! the registry as an explicit argument. There is no ambient or global
//! registry.
//!
//! Loaded metadata is append-only, so the ancestor-field cache is a
//! read-mostly map behind an `RwLock`, cleared on registration.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::descriptor::{
    ConstructorDescriptor, FieldDescriptor, MethodDescriptor, Modifiers, ParameterDescriptor,
    TypeDescriptor, TypeRef,
};
use crate::error::{ReflectError, ReflectResult};
use crate::instance::Instance;
use crate::value::{ObjectRef, Value};

/// Definition of a field to be registered on a type
///
/// Fields are public by default; the visibility setters are mutually
/// exclusive (the last one called wins).
#[derive(Debug, Clone)]
pub struct FieldDef {
    name: String,
    ty: TypeRef,
    modifiers: Modifiers,
    annotations: Vec<String>,
    initializer: Option<Value>,
}

impl FieldDef {
    /// Create a public field definition
    pub fn new(name: &str, ty: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            ty,
            modifiers: Modifiers { is_public: true, ..Modifiers::default() },
            annotations: Vec::new(),
            initializer: None,
        }
    }

    /// Make the field private
    pub fn private(mut self) -> Self {
        self.modifiers.is_public = false;
        self.modifiers.is_protected = false;
        self.modifiers.is_private = true;
        self
    }

    /// Make the field protected
    pub fn protected(mut self) -> Self {
        self.modifiers.is_public = false;
        self.modifiers.is_private = false;
        self.modifiers.is_protected = true;
        self
    }

    /// Mark as static
    pub fn as_static(mut self) -> Self {
        self.modifiers.is_static = true;
        self
    }

    /// Mark as final
    pub fn as_final(mut self) -> Self {
        self.modifiers.is_final = true;
        self
    }

    /// Attach an annotation kind
    pub fn annotated(mut self, kind: &str) -> Self {
        self.annotations.push(kind.to_string());
        self
    }

    /// Set the construction-applied initial value
    pub fn initial_value(mut self, value: Value) -> Self {
        self.initializer = Some(value);
        self
    }
}

/// Definition of a method to be registered on a type
#[derive(Debug, Clone)]
pub struct MethodDef {
    name: String,
    return_type: TypeRef,
    parameters: Vec<ParameterDescriptor>,
    modifiers: Modifiers,
    annotations: Vec<String>,
}

impl MethodDef {
    /// Create a public method definition
    pub fn new(name: &str, return_type: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            return_type,
            parameters: Vec::new(),
            modifiers: Modifiers { is_public: true, ..Modifiers::default() },
            annotations: Vec::new(),
        }
    }

    /// Append a parameter
    pub fn param(mut self, name: &str, ty: TypeRef) -> Self {
        self.parameters.push(ParameterDescriptor { name: name.to_string(), ty });
        self
    }

    /// Make the method private
    pub fn private(mut self) -> Self {
        self.modifiers.is_public = false;
        self.modifiers.is_protected = false;
        self.modifiers.is_private = true;
        self
    }

    /// Make the method protected
    pub fn protected(mut self) -> Self {
        self.modifiers.is_public = false;
        self.modifiers.is_private = false;
        self.modifiers.is_protected = true;
        self
    }

    /// Mark as static
    pub fn as_static(mut self) -> Self {
        self.modifiers.is_static = true;
        self
    }

    /// Mark as final
    pub fn as_final(mut self) -> Self {
        self.modifiers.is_final = true;
        self
    }

    /// Attach an annotation kind
    pub fn annotated(mut self, kind: &str) -> Self {
        self.annotations.push(kind.to_string());
        self
    }
}

/// Definition of a constructor to be registered on a type
#[derive(Debug, Clone, Default)]
pub struct ConstructorDef {
    parameters: Vec<ParameterDescriptor>,
}

impl ConstructorDef {
    /// Create an empty constructor definition
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a zero-argument constructor definition
    pub fn zero_arg() -> Self {
        Self::default()
    }

    /// Append a parameter
    pub fn param(mut self, name: &str, ty: TypeRef) -> Self {
        self.parameters.push(ParameterDescriptor { name: name.to_string(), ty });
        self
    }
}

/// Builder describing one type to register
#[derive(Debug, Clone)]
pub struct TypeBuilder {
    name: String,
    parent: Option<usize>,
    is_abstract: bool,
    annotations: Vec<String>,
    fields: Vec<FieldDef>,
    methods: Vec<MethodDef>,
    constructors: Vec<ConstructorDef>,
}

impl TypeBuilder {
    /// Start a type definition with the given (optionally dotted) name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            is_abstract: false,
            annotations: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    /// Set the parent type
    pub fn extends(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Mark the type abstract (not instantiable)
    pub fn as_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Attach an annotation kind to the type
    pub fn annotated(mut self, kind: &str) -> Self {
        self.annotations.push(kind.to_string());
        self
    }

    /// Append a field declaration
    pub fn field(mut self, def: FieldDef) -> Self {
        self.fields.push(def);
        self
    }

    /// Append a method declaration
    pub fn method(mut self, def: MethodDef) -> Self {
        self.methods.push(def);
        self
    }

    /// Append a constructor declaration
    ///
    /// A type with no declared constructors gets an implicit zero-argument
    /// construction; declaring only non-zero-arg constructors removes it.
    pub fn constructor(mut self, def: ConstructorDef) -> Self {
        self.constructors.push(def);
        self
    }
}

/// Registry of type metadata
///
/// Type ids are indices assigned at registration. Parent links must point at
/// already-registered types, so hierarchies are built root-first and are
/// acyclic by construction.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: Vec<TypeDescriptor>,
    by_name: FxHashMap<String, usize>,
    // Ancestor-chain field lists, keyed by type id.
    field_cache: RwLock<FxHashMap<usize, Arc<Vec<FieldDescriptor>>>>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type, assigning and returning its id
    pub fn register(&mut self, builder: TypeBuilder) -> ReflectResult<usize> {
        if builder.name.is_empty() {
            return Err(ReflectError::InvalidArgument("type name must not be empty"));
        }
        if self.by_name.contains_key(&builder.name) {
            return Err(ReflectError::InvalidArgument("type name is already registered"));
        }
        if let Some(parent) = builder.parent {
            if parent >= self.types.len() {
                return Err(ReflectError::InvalidArgument("parent type is not registered"));
            }
        }

        let id = self.types.len();
        let fields = builder
            .fields
            .into_iter()
            .map(|f| FieldDescriptor {
                name: f.name,
                ty: f.ty,
                modifiers: f.modifiers,
                annotations: f.annotations,
                initializer: f.initializer,
                declared_in: id,
                accessible: false,
            })
            .collect();
        let methods = builder
            .methods
            .into_iter()
            .map(|m| MethodDescriptor {
                name: m.name,
                return_type: m.return_type,
                parameters: m.parameters,
                modifiers: m.modifiers,
                annotations: m.annotations,
                declared_in: id,
            })
            .collect();
        let constructors = builder
            .constructors
            .into_iter()
            .map(|c| ConstructorDescriptor { parameters: c.parameters, declared_in: id })
            .collect();

        self.by_name.insert(builder.name.clone(), id);
        self.types.push(TypeDescriptor {
            id,
            name: builder.name,
            parent: builder.parent,
            is_abstract: builder.is_abstract,
            annotations: builder.annotations,
            fields,
            methods,
            constructors,
        });
        self.field_cache.get_mut().clear();
        Ok(id)
    }

    /// Look up a type by id
    pub fn get(&self, id: usize) -> Option<&TypeDescriptor> {
        self.types.get(id)
    }

    /// Look up a type by its registered name
    pub fn get_by_name(&self, name: &str) -> Option<&TypeDescriptor> {
        self.by_name.get(name).and_then(|&id| self.types.get(id))
    }

    /// Iterate all registered types in id order
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.iter()
    }

    /// Inheritance chain from the given type up to its root ancestor
    pub fn hierarchy(&self, id: usize) -> ReflectResult<Vec<&TypeDescriptor>> {
        let mut chain = Vec::new();
        let mut current = Some(self.get(id).ok_or(ReflectError::InvalidArgument(
            "type is not registered in this registry",
        ))?);
        while let Some(ty) = current {
            chain.push(ty);
            current = match ty.parent {
                Some(parent) => Some(self.get(parent).ok_or_else(|| {
                    ReflectError::MetadataAccess(format!(
                        "type `{}` links to unknown parent type {}",
                        ty.name, parent
                    ))
                })?),
                None => None,
            };
        }
        Ok(chain)
    }

    /// Whether `sub` is `sup` or inherits from it
    pub fn is_subtype_of(&self, sub: usize, sup: usize) -> bool {
        if sub == sup {
            return self.get(sub).is_some();
        }
        let mut current = sub;
        while let Some(ty) = self.get(current) {
            match ty.parent {
                Some(parent) if parent == sup => return true,
                Some(parent) => current = parent,
                None => break,
            }
        }
        false
    }

    /// Every field declared along the ancestor chain, own fields first
    ///
    /// Served from the read-mostly cache; computed on first query per type.
    pub(crate) fn ancestor_fields(&self, id: usize) -> ReflectResult<Arc<Vec<FieldDescriptor>>> {
        if let Some(cached) = self.field_cache.read().get(&id) {
            return Ok(cached.clone());
        }
        let mut fields = Vec::new();
        for ty in self.hierarchy(id)? {
            fields.extend(ty.fields.iter().cloned());
        }
        let fields = Arc::new(fields);
        self.field_cache.write().insert(id, fields.clone());
        Ok(fields)
    }

    /// Construct a fresh instance of the given type
    ///
    /// Requires a non-abstract type with a zero-argument construction. Every
    /// non-static field along the ancestor chain gets a slot, initialized to
    /// the field's declared initial value or its type's zero value.
    pub fn instantiate(&self, id: usize) -> ReflectResult<ObjectRef> {
        let ty = self.get(id).ok_or(ReflectError::InvalidArgument(
            "type is not registered in this registry",
        ))?;
        if ty.is_abstract {
            log::error!("cannot construct instance of `{}`: type is abstract", ty.name);
            return Err(ReflectError::CopyConstruction {
                type_name: ty.name.clone(),
                reason: "type is abstract",
            });
        }
        if !ty.has_zero_arg_constructor() {
            log::error!(
                "cannot construct instance of `{}`: no zero-argument constructor",
                ty.name
            );
            return Err(ReflectError::CopyConstruction {
                type_name: ty.name.clone(),
                reason: "no zero-argument constructor",
            });
        }

        let mut slots = FxHashMap::default();
        for field in self.ancestor_fields(id)?.iter() {
            if field.is_static() {
                continue;
            }
            let initial = field
                .initializer
                .clone()
                .unwrap_or_else(|| field.ty.zero_value());
            slots.insert((field.declared_in, field.name.clone()), initial);
        }
        Ok(Rc::new(RefCell::new(Instance::new(id, ty.name.clone(), slots))))
    }
}
