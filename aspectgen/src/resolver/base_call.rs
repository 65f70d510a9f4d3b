//! Base-class chaining decisions.
//!
//! Only reference types chain to their base; value types have no base
//! implementation worth consulting.

use crate::analysis::TypeShapeQuery;
use crate::ir::{BaseCallPolicy, TypeDescriptor};

/// Whether `Equals` also requires `base.Equals(obj)`.
///
/// Under `Auto` the immediate base must carry its own equality
/// configuration, redefine `Equals`, or mark a member for equality.
pub fn chains_equals(ty: &TypeDescriptor, policy: BaseCallPolicy) -> bool {
    if !ty.is_reference_type() {
        return false;
    }
    match policy {
        BaseCallPolicy::Always => true,
        BaseCallPolicy::Never => false,
        BaseCallPolicy::Auto => ty.base.as_deref().is_some_and(|base| {
            base.attributes.auto_equals.is_some()
                || base.shape.overrides_equals()
                || base.members.iter().any(|m| m.attributes.equals.is_some())
        }),
    }
}

/// Whether `GetHashCode` also folds in `base.GetHashCode()`.
pub fn chains_hash_code(ty: &TypeDescriptor, policy: BaseCallPolicy) -> bool {
    if !ty.is_reference_type() {
        return false;
    }
    match policy {
        BaseCallPolicy::Always => true,
        BaseCallPolicy::Never => false,
        BaseCallPolicy::Auto => ty
            .base
            .as_deref()
            .is_some_and(|base| base.shape.overrides_get_hash_code()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{
        AutoEquals, EqualsMarker, MemberAttributes, MemberDescriptor, ObjectMethod, ShapeKind,
        TypeAttributes, TypeShape,
    };

    fn derived(base: TypeDescriptor) -> TypeDescriptor {
        TypeDescriptor::new("Derived", Some("App")).with_base(base)
    }

    #[test]
    fn test_value_types_never_chain() {
        let ty = TypeDescriptor::new("Point", Some("App")).with_kind(ShapeKind::Struct);
        assert!(!chains_equals(&ty, BaseCallPolicy::Always));
        assert!(!chains_hash_code(&ty, BaseCallPolicy::Always));
    }

    #[test]
    fn test_explicit_policies() {
        let ty = TypeDescriptor::new("Plain", Some("App"));
        assert!(chains_equals(&ty, BaseCallPolicy::Always));
        assert!(!chains_equals(&ty, BaseCallPolicy::Never));
        assert!(!chains_equals(&ty, BaseCallPolicy::Auto));
    }

    #[test]
    fn test_auto_equals_follows_base() {
        let configured = TypeDescriptor::new("Base", Some("App")).with_attributes(TypeAttributes {
            auto_equals: Some(AutoEquals::default()),
            ..Default::default()
        });
        assert!(chains_equals(&derived(configured), BaseCallPolicy::Auto));

        let mut overriding = TypeDescriptor::new("Base", Some("App"));
        overriding.shape = overriding.shape.with_override(ObjectMethod::Equals);
        assert!(chains_equals(&derived(overriding), BaseCallPolicy::Auto));

        let marked = TypeDescriptor::new("Base", Some("App")).with_member(
            MemberDescriptor::field("_id", TypeShape::primitive("int")).with_attributes(
                MemberAttributes {
                    equals: Some(EqualsMarker::default()),
                    ..Default::default()
                },
            ),
        );
        assert!(chains_equals(&derived(marked), BaseCallPolicy::Auto));

        let plain = TypeDescriptor::new("Base", Some("App"));
        assert!(!chains_equals(&derived(plain), BaseCallPolicy::Auto));
    }

    #[test]
    fn test_auto_hash_follows_base_override() {
        let mut overriding = TypeDescriptor::new("Base", Some("App"));
        overriding.shape = overriding.shape.with_override(ObjectMethod::GetHashCode);
        assert!(chains_hash_code(&derived(overriding), BaseCallPolicy::Auto));

        let configured = TypeDescriptor::new("Base", Some("App")).with_attributes(TypeAttributes {
            auto_equals: Some(AutoEquals::default()),
            ..Default::default()
        });
        assert!(!chains_hash_code(&derived(configured), BaseCallPolicy::Auto));
    }
}
