//! Null-safety policy.

use crate::analysis::TypeShapeQuery;
use crate::ir::{ComparerRef, MemberAttributes, NullSafety, TypeShape};

/// Effective policy for one member, first match wins:
///
/// 1. an explicit member-level override
/// 2. a not-null contract turns guarding off
/// 3. a maybe-null contract turns guarding on
/// 4. a comparer that accepts nullable operands turns guarding off
/// 5. the type-level default
pub fn resolve_policy(
    member_override: Option<NullSafety>,
    attributes: &MemberAttributes,
    comparer: Option<&ComparerRef>,
    type_default: NullSafety,
) -> NullSafety {
    if let Some(policy) = member_override.filter(|p| *p != NullSafety::Auto) {
        return policy;
    }
    if attributes.not_null {
        return NullSafety::Off;
    }
    if attributes.maybe_null {
        return NullSafety::On;
    }
    if comparer.is_some_and(|c| c.accepts_nullable) {
        return NullSafety::Off;
    }
    type_default
}

/// Whether comparisons on a member of type `ty` get null guards.
///
/// `Auto` guards when the nullable context cannot vouch for the value:
/// outside a nullable-aware context, or when the type is annotated.
pub fn is_null_safe(policy: NullSafety, nullable_context: bool, ty: &TypeShape) -> bool {
    match policy {
        NullSafety::On => true,
        NullSafety::Off => false,
        NullSafety::Auto => !nullable_context || ty.has_nullable_annotation(),
    }
}
