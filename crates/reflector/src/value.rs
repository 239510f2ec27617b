//! Dynamic values held in instance field slots
//!
//! Scalars (numeric, boolean, character, text) carry value semantics and are
//! the copy-by-value terminals of the deep-copy engine. `Object` is the only
//! composite: a shared, mutable reference to an [`Instance`], compared by
//! pointer identity.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::instance::Instance;

/// Shared reference to a dynamic object instance
pub type ObjectRef = Rc<RefCell<Instance>>;

/// A value stored in an instance field slot
#[derive(Clone)]
pub enum Value {
    /// Absent value; the default for reference-typed slots
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Integer scalar
    Int(i64),
    /// Floating-point scalar
    Float(f64),
    /// Character scalar
    Char(char),
    /// Text scalar; cloned on copy, never shared
    Str(String),
    /// Reference to an object instance
    Object(ObjectRef),
}

impl Value {
    /// Whether this value is `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the value's kind, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::Object(_) => "object",
        }
    }

    /// Borrow the object reference, if this value is one
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

/// Structural equality for scalars, pointer identity for objects
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// Object graphs may be self-referential, so Debug must not recurse into
// instances.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(i) => write!(f, "Int({i})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Char(c) => write!(f, "Char({c:?})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Object(obj) => match obj.try_borrow() {
                Ok(inst) => write!(f, "Object({})", inst.class_name()),
                Err(_) => write!(f, "Object(<borrowed>)"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_equality_is_structural() {
        assert_eq!(Value::Int(42), Value::Int(42));
        assert_ne!(Value::Int(42), Value::Int(43));
        assert_eq!(Value::Str("a".to_string()), Value::Str("a".to_string()));
        assert_ne!(Value::Int(0), Value::Null);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Null.kind_name(), "null");
        assert_eq!(Value::Bool(true).kind_name(), "bool");
        assert_eq!(Value::Str(String::new()).kind_name(), "string");
    }
}
