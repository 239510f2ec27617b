//! Opt-in failure-suppressing wrappers
//!
//! Each wrapper converts any failure from the underlying operation into an
//! empty or absent result, logging what was suppressed at debug level. This
//! masks misuse (wrong type id, wrong annotation name) behind "no result",
//! so it is never used inside the core — reach for it only at boundaries
//! where a loud failure is genuinely worse than an empty answer.

use crate::descriptor::{FieldDescriptor, MethodDescriptor, ModifierPredicate};
use crate::members;
use crate::registry::TypeRegistry;
use crate::value::Value;

/// [`members::all_fields`], suppressing failures to an empty list
pub fn all_fields(reg: &TypeRegistry, type_id: usize) -> Vec<FieldDescriptor> {
    members::all_fields(reg, type_id).unwrap_or_else(|e| {
        log::debug!("all_fields({type_id}) suppressed: {e}");
        Vec::new()
    })
}

/// [`members::all_fields_with_modifiers`], suppressing failures to an empty list
pub fn all_fields_with_modifiers(
    reg: &TypeRegistry,
    type_id: usize,
    predicates: &[ModifierPredicate],
) -> Vec<FieldDescriptor> {
    members::all_fields_with_modifiers(reg, type_id, predicates).unwrap_or_else(|e| {
        log::debug!("all_fields_with_modifiers({type_id}) suppressed: {e}");
        Vec::new()
    })
}

/// [`members::all_methods_with_modifiers`], suppressing failures to an empty list
pub fn all_methods_with_modifiers(
    reg: &TypeRegistry,
    type_id: usize,
    predicates: &[ModifierPredicate],
) -> Vec<MethodDescriptor> {
    members::all_methods_with_modifiers(reg, type_id, predicates).unwrap_or_else(|e| {
        log::debug!("all_methods_with_modifiers({type_id}) suppressed: {e}");
        Vec::new()
    })
}

/// [`members::all_annotated_fields`], suppressing failures to an empty list
pub fn all_annotated_fields(
    reg: &TypeRegistry,
    type_id: usize,
    annotation: &str,
) -> Vec<FieldDescriptor> {
    members::all_annotated_fields(reg, type_id, annotation).unwrap_or_else(|e| {
        log::debug!("all_annotated_fields({type_id}, {annotation}) suppressed: {e}");
        Vec::new()
    })
}

/// [`crate::copy`], suppressing failures to `None`
pub fn copy(reg: &TypeRegistry, object: &Value) -> Option<Value> {
    match crate::copy::copy(reg, object) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("copy suppressed: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_become_empty_results() {
        let reg = TypeRegistry::new();
        assert!(all_fields(&reg, 0).is_empty());
        assert!(all_fields_with_modifiers(&reg, 0, &[ModifierPredicate::Private]).is_empty());
        assert!(all_methods_with_modifiers(&reg, 0, &[ModifierPredicate::Public]).is_empty());
        assert!(all_annotated_fields(&reg, 0, "Marker").is_empty());
        assert!(copy(&reg, &Value::Null).is_none());
    }

    #[test]
    fn test_successes_pass_through() {
        use crate::descriptor::TypeRef;
        use crate::registry::{FieldDef, TypeBuilder};

        let mut reg = TypeRegistry::new();
        let id = reg
            .register(TypeBuilder::new("T").field(FieldDef::new("a", TypeRef::Int)))
            .unwrap();
        assert_eq!(all_fields(&reg, id).len(), 1);
        assert_eq!(copy(&reg, &Value::Int(1)), Some(Value::Int(1)));
    }
}
