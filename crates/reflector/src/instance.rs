//! Dynamic object instances
//!
//! An [`Instance`] is a bag of field slots for one registered type, created
//! by [`crate::TypeRegistry::instantiate`]. Slots are keyed by the declaring
//! type id plus the field name, so a subtype field that shadows a parent
//! field of the same name has its own storage, matching raw declaration
//! semantics.

use rustc_hash::FxHashMap;

use crate::descriptor::FieldDescriptor;
use crate::error::{ReflectError, ReflectResult};
use crate::value::Value;

/// Field-slot storage for one object
#[derive(Debug)]
pub struct Instance {
    class: usize,
    class_name: String,
    slots: FxHashMap<(usize, String), Value>,
}

impl Instance {
    pub(crate) fn new(
        class: usize,
        class_name: String,
        slots: FxHashMap<(usize, String), Value>,
    ) -> Self {
        Self { class, class_name, slots }
    }

    /// Id of the instance's concrete type
    pub fn class_id(&self) -> usize {
        self.class
    }

    /// Name of the instance's concrete type
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Read a field slot through its descriptor
    ///
    /// Non-public fields require the descriptor handle to have been switched
    /// accessible first; static fields have no per-instance storage.
    pub fn get(&self, field: &FieldDescriptor) -> ReflectResult<Value> {
        self.check_access(field)?;
        self.slots
            .get(&(field.declared_in, field.name.clone()))
            .cloned()
            .ok_or_else(|| self.no_such_slot(field))
    }

    /// Write a field slot through its descriptor
    ///
    /// Writes are checked against the slot's declared type; `Null` is always
    /// assignable.
    pub fn set(&mut self, field: &FieldDescriptor, value: Value) -> ReflectResult<()> {
        self.check_access(field)?;
        if !field.ty.accepts(&value) {
            return Err(ReflectError::FieldAccess {
                type_name: self.class_name.clone(),
                field: field.name.clone(),
                reason: format!(
                    "expected {} value, got {}",
                    field.ty.describe(),
                    value.kind_name()
                ),
            });
        }
        match self.slots.get_mut(&(field.declared_in, field.name.clone())) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(self.no_such_slot(field)),
        }
    }

    fn check_access(&self, field: &FieldDescriptor) -> ReflectResult<()> {
        if field.is_static() {
            return Err(ReflectError::FieldAccess {
                type_name: self.class_name.clone(),
                field: field.name.clone(),
                reason: "static fields have no per-instance storage".to_string(),
            });
        }
        if !field.modifiers.is_public && !field.accessible {
            return Err(ReflectError::FieldAccess {
                type_name: self.class_name.clone(),
                field: field.name.clone(),
                reason: "field is not accessible".to_string(),
            });
        }
        Ok(())
    }

    fn no_such_slot(&self, field: &FieldDescriptor) -> ReflectError {
        ReflectError::FieldAccess {
            type_name: self.class_name.clone(),
            field: field.name.clone(),
            reason: "no such slot on this instance".to_string(),
        }
    }
}
