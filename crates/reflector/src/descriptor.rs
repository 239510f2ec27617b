//! Type and member descriptors
//!
//! Descriptors are owned metadata snapshots produced by [`crate::TypeRegistry`]
//! queries. They are never constructed directly by callers; the registry fills
//! in the declaring type when a [`crate::TypeBuilder`] is registered.

use crate::value::Value;

/// Declared type of a field, parameter, or return value
///
/// The scalar kinds are a fixed enumeration: they are the copy-by-value
/// terminals of the deep-copy engine and are not user-extensible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRef {
    /// Boolean scalar
    Bool,
    /// Integer scalar
    Int,
    /// Floating-point scalar
    Float,
    /// Character scalar
    Char,
    /// Text scalar
    Str,
    /// No value; return type of void methods
    Unit,
    /// A registered class, by type id
    Class(usize),
}

impl TypeRef {
    /// Whether this declared type is a copy-by-value terminal
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            TypeRef::Bool | TypeRef::Int | TypeRef::Float | TypeRef::Char | TypeRef::Str
        )
    }

    /// Default slot value for an uninitialized field of this type
    ///
    /// Numeric, boolean, and character slots default to their zero value;
    /// text and class slots are reference-typed and default to `Null`.
    pub fn zero_value(&self) -> Value {
        match self {
            TypeRef::Bool => Value::Bool(false),
            TypeRef::Int => Value::Int(0),
            TypeRef::Float => Value::Float(0.0),
            TypeRef::Char => Value::Char('\0'),
            TypeRef::Str | TypeRef::Unit | TypeRef::Class(_) => Value::Null,
        }
    }

    /// Whether a value may be written into a slot of this declared type
    ///
    /// `Null` is assignable everywhere; scalars must match their kind;
    /// objects are only assignable to class-typed slots. Class-to-class
    /// compatibility is not checked at the slot level.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (TypeRef::Bool, Value::Bool(_)) => true,
            (TypeRef::Int, Value::Int(_)) => true,
            (TypeRef::Float, Value::Float(_)) => true,
            (TypeRef::Char, Value::Char(_)) => true,
            (TypeRef::Str, Value::Str(_)) => true,
            (TypeRef::Class(_), Value::Object(_)) => true,
            _ => false,
        }
    }

    /// Short name for diagnostics
    pub fn describe(&self) -> String {
        match self {
            TypeRef::Bool => "bool".to_string(),
            TypeRef::Int => "int".to_string(),
            TypeRef::Float => "float".to_string(),
            TypeRef::Char => "char".to_string(),
            TypeRef::Str => "string".to_string(),
            TypeRef::Unit => "unit".to_string(),
            TypeRef::Class(id) => format!("class#{id}"),
        }
    }
}

/// Modifier flags for class members
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Public visibility
    pub is_public: bool,
    /// Private visibility
    pub is_private: bool,
    /// Protected visibility
    pub is_protected: bool,
    /// Static member
    pub is_static: bool,
    /// Final (immutable) member
    pub is_final: bool,
}

/// A single modifier criterion; sets of predicates combine with OR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierPredicate {
    /// Matches public members
    Public,
    /// Matches private members
    Private,
    /// Matches protected members
    Protected,
    /// Matches static members
    Static,
    /// Matches final members
    Final,
}

impl ModifierPredicate {
    /// Whether the given modifier set satisfies this predicate
    pub fn matches(&self, modifiers: &Modifiers) -> bool {
        match self {
            ModifierPredicate::Public => modifiers.is_public,
            ModifierPredicate::Private => modifiers.is_private,
            ModifierPredicate::Protected => modifiers.is_protected,
            ModifierPredicate::Static => modifiers.is_static,
            ModifierPredicate::Final => modifiers.is_final,
        }
    }
}

/// Descriptor for a single declared field
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,
    /// Declared type
    pub ty: TypeRef,
    /// Modifier flags
    pub modifiers: Modifiers,
    /// Annotation kinds carried by the field
    pub annotations: Vec<String>,
    /// Construction-applied initial value, if any
    pub initializer: Option<Value>,
    /// Id of the declaring type
    pub declared_in: usize,
    /// Whether visibility enforcement is bypassed for this handle
    ///
    /// Flipping this affects only the snapshot it is called on, never the
    /// registry's stored metadata.
    pub accessible: bool,
}

impl FieldDescriptor {
    /// Whether the field is final
    pub fn is_final(&self) -> bool {
        self.modifiers.is_final
    }

    /// Whether the field is static
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static
    }

    /// Whether the field carries the given annotation kind
    pub fn has_annotation(&self, kind: &str) -> bool {
        self.annotations.iter().any(|a| a == kind)
    }

    /// Bypass visibility enforcement on this handle
    pub fn make_accessible(&mut self) {
        self.accessible = true;
    }
}

/// Descriptor for a single method parameter
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    /// Parameter name
    pub name: String,
    /// Declared type
    pub ty: TypeRef,
}

/// Descriptor for a single declared method
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    /// Method name
    pub name: String,
    /// Declared return type
    pub return_type: TypeRef,
    /// Parameters in declaration order
    pub parameters: Vec<ParameterDescriptor>,
    /// Modifier flags
    pub modifiers: Modifiers,
    /// Annotation kinds carried by the method
    pub annotations: Vec<String>,
    /// Id of the declaring type
    pub declared_in: usize,
}

impl MethodDescriptor {
    /// Declared parameter types, in order
    pub fn parameter_types(&self) -> Vec<TypeRef> {
        self.parameters.iter().map(|p| p.ty).collect()
    }

    /// Whether the method carries the given annotation kind
    pub fn has_annotation(&self, kind: &str) -> bool {
        self.annotations.iter().any(|a| a == kind)
    }
}

/// Descriptor for a single declared constructor
#[derive(Debug, Clone)]
pub struct ConstructorDescriptor {
    /// Parameters in declaration order
    pub parameters: Vec<ParameterDescriptor>,
    /// Id of the declaring type
    pub declared_in: usize,
}

impl ConstructorDescriptor {
    /// Whether this constructor takes no arguments
    pub fn is_zero_arg(&self) -> bool {
        self.parameters.is_empty()
    }
}

/// Metadata for one registered type
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Type id assigned at registration
    pub id: usize,
    /// Qualified type name, dot-separated
    pub name: String,
    /// Parent type id; `None` at the root
    pub parent: Option<usize>,
    /// Whether the type can be instantiated
    pub is_abstract: bool,
    /// Annotation kinds carried by the type
    pub annotations: Vec<String>,
    /// Fields in declaration order
    pub fields: Vec<FieldDescriptor>,
    /// Methods in declaration order
    pub methods: Vec<MethodDescriptor>,
    /// Declared constructors; an empty list means an implicit zero-argument
    /// construction is available
    pub constructors: Vec<ConstructorDescriptor>,
}

impl TypeDescriptor {
    /// Last segment of the qualified name
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Qualified name minus the last segment, or empty for unqualified names
    pub fn package_name(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) => &self.name[..idx],
            None => "",
        }
    }

    /// Whether the type carries the given annotation kind
    pub fn has_annotation(&self, kind: &str) -> bool {
        self.annotations.iter().any(|a| a == kind)
    }

    /// Whether a zero-argument construction is available
    ///
    /// True when no constructors are declared (implicit default) or when a
    /// declared constructor takes no arguments.
    pub fn has_zero_arg_constructor(&self) -> bool {
        self.constructors.is_empty() || self.constructors.iter().any(|c| c.is_zero_arg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_classification_is_fixed() {
        assert!(TypeRef::Bool.is_scalar());
        assert!(TypeRef::Int.is_scalar());
        assert!(TypeRef::Float.is_scalar());
        assert!(TypeRef::Char.is_scalar());
        assert!(TypeRef::Str.is_scalar());
        assert!(!TypeRef::Unit.is_scalar());
        assert!(!TypeRef::Class(0).is_scalar());
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(TypeRef::Int.zero_value(), Value::Int(0));
        assert_eq!(TypeRef::Bool.zero_value(), Value::Bool(false));
        // Reference-typed slots default to null, not empty text.
        assert_eq!(TypeRef::Str.zero_value(), Value::Null);
        assert_eq!(TypeRef::Class(3).zero_value(), Value::Null);
    }

    #[test]
    fn test_slot_assignability() {
        assert!(TypeRef::Int.accepts(&Value::Int(1)));
        assert!(TypeRef::Int.accepts(&Value::Null));
        assert!(!TypeRef::Int.accepts(&Value::Str("1".to_string())));
        assert!(!TypeRef::Class(0).accepts(&Value::Int(1)));
    }

    #[test]
    fn test_modifier_predicates() {
        let mods = Modifiers {
            is_private: true,
            is_static: true,
            ..Modifiers::default()
        };
        assert!(ModifierPredicate::Private.matches(&mods));
        assert!(ModifierPredicate::Static.matches(&mods));
        assert!(!ModifierPredicate::Public.matches(&mods));
        assert!(!ModifierPredicate::Final.matches(&mods));
    }

    #[test]
    fn test_qualified_names() {
        let ty = TypeDescriptor {
            id: 0,
            name: "geometry.shapes.Circle".to_string(),
            parent: None,
            is_abstract: false,
            annotations: vec![],
            fields: vec![],
            methods: vec![],
            constructors: vec![],
        };
        assert_eq!(ty.simple_name(), "Circle");
        assert_eq!(ty.package_name(), "geometry.shapes");

        let bare = TypeDescriptor { name: "Point".to_string(), ..ty };
        assert_eq!(bare.simple_name(), "Point");
        assert_eq!(bare.package_name(), "");
    }
}
