//! Member enumeration over a type's inheritance chain
//!
//! Every operation walks from the queried type up through its ancestors,
//! collecting declared members at each level: own members first (declaration
//! order), then the parent's, terminating at the root. No de-duplication is
//! performed, so a subtype field that shadows a parent field of the same
//! name appears once per declaring type.
//!
//! Modifier filters combine with OR: a member is kept when at least one
//! predicate in the supplied set matches. An empty predicate set therefore
//! matches nothing.

use rustc_hash::FxHashMap;

use crate::descriptor::{FieldDescriptor, MethodDescriptor, ModifierPredicate, TypeDescriptor};
use crate::error::{ReflectError, ReflectResult};
use crate::registry::TypeRegistry;

/// Every field declared along the ancestor chain of `type_id`
pub fn all_fields(reg: &TypeRegistry, type_id: usize) -> ReflectResult<Vec<FieldDescriptor>> {
    Ok(reg.ancestor_fields(type_id)?.as_ref().clone())
}

/// Ancestor-chain fields whose modifiers satisfy at least one predicate
pub fn all_fields_with_modifiers(
    reg: &TypeRegistry,
    type_id: usize,
    predicates: &[ModifierPredicate],
) -> ReflectResult<Vec<FieldDescriptor>> {
    let mut fields = all_fields(reg, type_id)?;
    fields.retain(|f| predicates.iter().any(|p| p.matches(&f.modifiers)));
    Ok(fields)
}

/// Ancestor-chain private fields
pub fn all_private_fields(
    reg: &TypeRegistry,
    type_id: usize,
) -> ReflectResult<Vec<FieldDescriptor>> {
    all_fields_with_modifiers(reg, type_id, &[ModifierPredicate::Private])
}

/// Ancestor-chain fields carrying the given annotation kind
///
/// Every returned descriptor is already switched accessible, so callers can
/// read and write through it without a separate step. This is a documented
/// contract, not an accident: annotation-driven consumers (injectors,
/// serializers) always need the access anyway.
pub fn all_annotated_fields(
    reg: &TypeRegistry,
    type_id: usize,
    annotation: &str,
) -> ReflectResult<Vec<FieldDescriptor>> {
    let mut fields = all_fields(reg, type_id)?;
    fields.retain(|f| f.has_annotation(annotation));
    for field in &mut fields {
        field.make_accessible();
    }
    Ok(fields)
}

/// Ancestor-chain methods whose modifiers satisfy at least one predicate
///
/// The chain is iterated with an explicit work-list rather than recursion,
/// so arbitrarily deep hierarchies cannot exhaust the stack.
pub fn all_methods_with_modifiers(
    reg: &TypeRegistry,
    type_id: usize,
    predicates: &[ModifierPredicate],
) -> ReflectResult<Vec<MethodDescriptor>> {
    if reg.get(type_id).is_none() {
        return Err(ReflectError::InvalidArgument(
            "type is not registered in this registry",
        ));
    }

    let mut methods = Vec::new();
    let mut work = vec![type_id];
    while let Some(id) = work.pop() {
        let ty = reg.get(id).ok_or_else(|| {
            ReflectError::MetadataAccess(format!("hierarchy links to unknown type {id}"))
        })?;
        for method in &ty.methods {
            if predicates.iter().any(|p| p.matches(&method.modifiers)) {
                methods.push(method.clone());
            }
        }
        if let Some(parent) = ty.parent {
            work.push(parent);
        }
    }
    Ok(methods)
}

/// Ancestor-chain private methods
pub fn all_private_methods(
    reg: &TypeRegistry,
    type_id: usize,
) -> ReflectResult<Vec<MethodDescriptor>> {
    all_methods_with_modifiers(reg, type_id, &[ModifierPredicate::Private])
}

/// Ancestor-chain public methods
pub fn all_public_methods(
    reg: &TypeRegistry,
    type_id: usize,
) -> ReflectResult<Vec<MethodDescriptor>> {
    all_methods_with_modifiers(reg, type_id, &[ModifierPredicate::Public])
}

/// Ancestor-chain public and protected methods
pub fn all_public_protected_methods(
    reg: &TypeRegistry,
    type_id: usize,
) -> ReflectResult<Vec<MethodDescriptor>> {
    all_methods_with_modifiers(
        reg,
        type_id,
        &[ModifierPredicate::Public, ModifierPredicate::Protected],
    )
}

/// Reshape a field list into a name-keyed map
///
/// First occurrence wins: with [`all_fields`] ordering, the queried type's
/// own declaration shadows an identically named ancestor field in map form,
/// even though both remain visible in list form.
pub fn fields_by_name(fields: &[FieldDescriptor]) -> FxHashMap<String, FieldDescriptor> {
    let mut map = FxHashMap::default();
    for field in fields {
        map.entry(field.name.clone()).or_insert_with(|| field.clone());
    }
    map
}

/// Ancestor-chain private fields as a name-keyed map
pub fn all_private_fields_by_name(
    reg: &TypeRegistry,
    type_id: usize,
) -> ReflectResult<FxHashMap<String, FieldDescriptor>> {
    Ok(fields_by_name(&all_private_fields(reg, type_id)?))
}

/// Every registered type carrying the given annotation kind
pub fn types_with_annotation<'a>(
    reg: &'a TypeRegistry,
    annotation: &str,
) -> Vec<&'a TypeDescriptor> {
    reg.iter().filter(|t| t.has_annotation(annotation)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::TypeRef;
    use crate::registry::{FieldDef, MethodDef, TypeBuilder};

    /// C extends B extends A, with a field shadowed at every level queried
    /// by the ancestor-completeness and shadowing tests.
    fn layered_registry() -> (TypeRegistry, usize, usize, usize) {
        let mut reg = TypeRegistry::new();
        let a = reg
            .register(
                TypeBuilder::new("A")
                    .field(FieldDef::new("id", TypeRef::Int).private())
                    .field(FieldDef::new("tag", TypeRef::Str)),
            )
            .unwrap();
        let b = reg
            .register(
                TypeBuilder::new("B")
                    .extends(a)
                    .field(FieldDef::new("x", TypeRef::Int).protected()),
            )
            .unwrap();
        let c = reg
            .register(
                TypeBuilder::new("C")
                    .extends(b)
                    .field(FieldDef::new("x", TypeRef::Int).private())
                    .field(FieldDef::new("label", TypeRef::Str).private()),
            )
            .unwrap();
        (reg, a, b, c)
    }

    // ========================================================================
    // Field enumeration
    // ========================================================================

    #[test]
    fn test_all_fields_walks_whole_chain_in_order() {
        let (reg, _, _, c) = layered_registry();
        let fields = all_fields(&reg, c).unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        // Own fields first, then B's, then A's.
        assert_eq!(names, ["x", "label", "x", "id", "tag"]);
    }

    #[test]
    fn test_all_fields_keeps_shadowed_declarations() {
        let (reg, _, b, c) = layered_registry();
        let fields = all_fields(&reg, c).unwrap();
        let xs: Vec<_> = fields.iter().filter(|f| f.name == "x").collect();
        assert_eq!(xs.len(), 2);
        assert_eq!(xs[0].declared_in, c);
        assert_eq!(xs[1].declared_in, b);
    }

    #[test]
    fn test_all_fields_unknown_type_is_invalid_argument() {
        let reg = TypeRegistry::new();
        assert!(matches!(
            all_fields(&reg, 3).unwrap_err(),
            ReflectError::InvalidArgument(_)
        ));
    }

    #[test]
    fn test_modifier_filter_is_or_combined() {
        let (reg, _, _, c) = layered_registry();
        let fields = all_fields_with_modifiers(
            &reg,
            c,
            &[ModifierPredicate::Private, ModifierPredicate::Protected],
        )
        .unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        // Everything except the public "tag".
        assert_eq!(names, ["x", "label", "x", "id"]);
    }

    #[test]
    fn test_empty_predicate_set_matches_nothing() {
        let (reg, _, _, c) = layered_registry();
        assert!(all_fields_with_modifiers(&reg, c, &[]).unwrap().is_empty());
        assert!(all_methods_with_modifiers(&reg, c, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_all_private_fields() {
        let (reg, _, _, c) = layered_registry();
        let names: Vec<_> = all_private_fields(&reg, c)
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, ["x", "label", "id"]);
    }

    // ========================================================================
    // Method enumeration
    // ========================================================================

    #[test]
    fn test_method_visibility_filter() {
        let mut reg = TypeRegistry::new();
        let id = reg
            .register(
                TypeBuilder::new("Service")
                    .method(MethodDef::new("start", TypeRef::Unit))
                    .method(MethodDef::new("configure", TypeRef::Unit).protected())
                    .method(MethodDef::new("internal", TypeRef::Unit).private()),
            )
            .unwrap();

        let visible = all_public_protected_methods(&reg, id).unwrap();
        let names: Vec<_> = visible.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["start", "configure"]);

        let hidden = all_private_methods(&reg, id).unwrap();
        assert_eq!(hidden.len(), 1);
        assert_eq!(hidden[0].name, "internal");
    }

    #[test]
    fn test_methods_collected_across_chain() {
        let mut reg = TypeRegistry::new();
        let base = reg
            .register(TypeBuilder::new("Base").method(MethodDef::new("close", TypeRef::Unit)))
            .unwrap();
        let sub = reg
            .register(
                TypeBuilder::new("Sub")
                    .extends(base)
                    .method(MethodDef::new("open", TypeRef::Unit)),
            )
            .unwrap();

        let names: Vec<_> = all_public_methods(&reg, sub)
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, ["open", "close"]);
    }

    // ========================================================================
    // Annotated fields
    // ========================================================================

    #[test]
    fn test_annotated_fields_are_returned_accessible() {
        let mut reg = TypeRegistry::new();
        let id = reg
            .register(
                TypeBuilder::new("Entry")
                    .field(FieldDef::new("key", TypeRef::Str).private().annotated("Marker"))
                    .field(FieldDef::new("value", TypeRef::Str).private()),
            )
            .unwrap();

        let annotated = all_annotated_fields(&reg, id, "Marker").unwrap();
        assert_eq!(annotated.len(), 1);
        assert_eq!(annotated[0].name, "key");
        assert!(annotated[0].accessible);

        // The plain enumeration hands out non-accessible snapshots.
        let plain = all_fields(&reg, id).unwrap();
        assert!(plain.iter().all(|f| !f.accessible));
    }

    // ========================================================================
    // Map view
    // ========================================================================

    #[test]
    fn test_fields_by_name_first_occurrence_wins() {
        let (reg, _, _, c) = layered_registry();
        let fields = all_fields(&reg, c).unwrap();
        let map = fields_by_name(&fields);
        // Both "x" declarations are in the list; only C's survives in map form.
        assert_eq!(map.len(), 4);
        assert_eq!(map["x"].declared_in, c);
    }

    #[test]
    fn test_types_with_annotation() {
        let mut reg = TypeRegistry::new();
        reg.register(TypeBuilder::new("Plain")).unwrap();
        reg.register(TypeBuilder::new("Marked").annotated("Entity")).unwrap();
        reg.register(TypeBuilder::new("AlsoMarked").annotated("Entity")).unwrap();

        let marked = types_with_annotation(&reg, "Entity");
        let names: Vec<_> = marked.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Marked", "AlsoMarked"]);
    }
}
