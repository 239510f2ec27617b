//! Runtime type introspection and generic deep copy
//!
//! This crate provides a small reflection facade over an explicit type
//! registry:
//! - Type metadata: registered descriptors with parent links, fields,
//!   methods, constructors, and annotation kinds
//! - Member enumeration: ancestor-chain field/method queries with
//!   modifier and annotation filters
//! - Dynamic instances: field slots read and written through descriptors,
//!   with visibility enforcement
//! - Deep copy: recursive, field-by-field duplication of object graphs
//!   with a fixed scalar/composite classification policy and direct
//!   self-reference preservation
//!
//! There is no global state: the [`TypeRegistry`] is a value the caller
//! constructs and passes to every operation.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reflector::{copy, members, FieldDef, TypeBuilder, TypeRef, TypeRegistry, Value};
//!
//! let mut reg = TypeRegistry::new();
//! let point = reg.register(
//!     TypeBuilder::new("Point")
//!         .field(FieldDef::new("x", TypeRef::Int).private())
//!         .field(FieldDef::new("y", TypeRef::Int).private()),
//! )?;
//!
//! let obj = reg.instantiate(point)?;
//! let twin = copy(&reg, &Value::Object(obj))?;
//! let private = members::all_private_fields(&reg, point)?;
//! ```

#![warn(rust_2018_idioms)]
#![warn(missing_docs)]

pub mod copy;
pub mod descriptor;
pub mod error;
pub mod instance;
pub mod members;
pub mod registry;
pub mod safe;
pub mod value;

pub use copy::copy;
pub use descriptor::{
    ConstructorDescriptor, FieldDescriptor, MethodDescriptor, Modifiers, ModifierPredicate,
    ParameterDescriptor, TypeDescriptor, TypeRef,
};
pub use error::{ReflectError, ReflectResult};
pub use instance::Instance;
pub use registry::{ConstructorDef, FieldDef, MethodDef, TypeBuilder, TypeRegistry};
pub use value::{ObjectRef, Value};
