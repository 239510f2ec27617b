//! Generic deep copy over dynamic object graphs
//!
//! Produces a structurally independent duplicate of an object: scalar fields
//! are assigned by value, composite fields are copied recursively, and a
//! field pointing directly at the object being copied is redirected to the
//! copy under construction so self-referential structures are preserved
//! without unbounded recursion.
//!
//! Only the direct self-reference case is short-circuited. An indirect cycle
//! (A → B → A) recurses until the stack is exhausted; this mirrors the
//! behavior callers may already depend on and is deliberately not fixed
//! here.

use std::rc::Rc;

use crate::error::{ReflectError, ReflectResult};
use crate::members;
use crate::registry::TypeRegistry;
use crate::value::{ObjectRef, Value};

/// Deep-copy a value
///
/// Scalars are returned by value. Objects are duplicated field by field:
/// null-valued and final fields are skipped, so the copy keeps whatever the
/// construction step put in those slots. Fails with
/// [`ReflectError::InvalidArgument`] on `Null` input — a missing object is a
/// caller bug, never a silent null result.
pub fn copy(reg: &TypeRegistry, object: &Value) -> ReflectResult<Value> {
    match object {
        Value::Null => Err(ReflectError::InvalidArgument("object must not be null")),
        Value::Object(src) => Ok(Value::Object(copy_object(reg, src)?)),
        scalar => Ok(scalar.clone()),
    }
}

fn copy_object(reg: &TypeRegistry, src: &ObjectRef) -> ReflectResult<ObjectRef> {
    let class_id = src.borrow().class_id();
    let copy_ref = reg.instantiate(class_id)?;
    let type_name = src.borrow().class_name().to_string();

    for field in members::all_fields(reg, class_id)? {
        if field.is_static() {
            continue;
        }
        let mut field = field;
        field.make_accessible();

        let value = src.borrow().get(&field).map_err(|e| {
            log::error!("deep copy of `{}.{}` failed: {}", type_name, field.name, e);
            ReflectError::CopyFailed {
                type_name: type_name.clone(),
                field: field.name.clone(),
                source: Box::new(e),
            }
        })?;
        // Construction value wins for absent values and immutable fields.
        if value.is_null() || field.is_final() {
            continue;
        }

        let duplicated = if field.ty.is_scalar() {
            value
        } else {
            match value.as_object() {
                // A direct self-reference is redirected to the copy itself.
                Some(child) if Rc::ptr_eq(child, src) => Value::Object(copy_ref.clone()),
                _ => copy(reg, &value)?,
            }
        };

        copy_ref.borrow_mut().set(&field, duplicated).map_err(|e| {
            log::error!("deep copy of `{}.{}` failed: {}", type_name, field.name, e);
            ReflectError::CopyFailed {
                type_name: type_name.clone(),
                field: field.name.clone(),
                source: Box::new(e),
            }
        })?;
    }

    Ok(copy_ref)
}
