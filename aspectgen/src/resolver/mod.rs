//! Per-member decisions.
//!
//! [`StrategyResolver`] binds the resolved [`Settings`] of one generator to
//! one type and answers, for each selected member, how it is guarded,
//! compared and hashed.

pub mod base_call;
pub mod null_safety;
pub mod settings;
pub mod strategy;

pub use base_call::{chains_equals, chains_hash_code};
pub use null_safety::{is_null_safe, resolve_policy};
pub use settings::{Settings, SettingsLayer};
pub use strategy::{
    reduce_comparer_name, resolve_equality, resolve_hash, EqualityPlan, EqualityStrategy,
    HashPlan, HashStrategy,
};

use tracing::debug;

use crate::analysis::SelectedMember;
use crate::ir::{ComparerRef, MemberAttributes, NullSafety, TypeDescriptor};

/// Resolves strategies for the members of one type.
#[derive(Debug, Clone, Copy)]
pub struct StrategyResolver<'a> {
    ty: &'a TypeDescriptor,
    settings: &'a Settings,
}

impl<'a> StrategyResolver<'a> {
    pub fn new(ty: &'a TypeDescriptor, settings: &'a Settings) -> Self {
        Self { ty, settings }
    }

    /// Equality plan for a selected member.
    pub fn equality(&self, member: &SelectedMember<'_>) -> EqualityPlan {
        let attributes = &member.attributes;
        let (comparer, member_override) = equality_comparer(attributes);
        let null_safe = self.null_safe(member, member_override, comparer);
        let comparer = comparer.map(|c| reduce_comparer_name(&self.ty.full_name, &c.name));

        let plan = resolve_equality(&member.member.ty, comparer, null_safe);
        debug!(member = member.name(), ?plan, "equality strategy");
        plan
    }

    /// Hash plan for a selected member.
    pub fn hash(&self, member: &SelectedMember<'_>) -> HashPlan {
        let attributes = &member.attributes;
        let (comparer, member_override) = hash_comparer(attributes);
        let null_safe = self.null_safe(member, member_override, comparer);
        let comparer = comparer.map(|c| reduce_comparer_name(&self.ty.full_name, &c.name));

        let plan = resolve_hash(&member.member.ty, comparer, null_safe);
        debug!(member = member.name(), ?plan, "hash strategy");
        plan
    }

    pub fn include_base_equals(&self) -> bool {
        chains_equals(self.ty, self.settings.base_call)
    }

    pub fn include_base_hash(&self) -> bool {
        chains_hash_code(self.ty, self.settings.base_call)
    }

    fn null_safe(
        &self,
        member: &SelectedMember<'_>,
        member_override: Option<NullSafety>,
        comparer: Option<&ComparerRef>,
    ) -> bool {
        let policy = resolve_policy(
            member_override,
            &member.attributes,
            comparer,
            self.settings.null_safety,
        );
        is_null_safe(policy, self.ty.nullable_context, &member.member.ty)
    }
}

/// Comparer and null-safety override for equality: the equality marker's
/// own comparer first, then a standalone comparer marker. An explicit
/// override on the equality marker wins whichever marker names the comparer.
fn equality_comparer(attributes: &MemberAttributes) -> (Option<&ComparerRef>, Option<NullSafety>) {
    let equals_override = attributes
        .equals
        .as_ref()
        .map(|m| m.null_safety)
        .filter(|p| *p != NullSafety::Auto);

    if let Some(marker) = &attributes.equals {
        if let Some(comparer) = &marker.comparer {
            return (Some(comparer), Some(marker.null_safety));
        }
    }
    if let Some(marker) = &attributes.equality_comparer {
        return (
            Some(&marker.comparer),
            equals_override.or(Some(marker.null_safety)),
        );
    }
    (None, attributes.equals.as_ref().map(|m| m.null_safety))
}

/// Comparer and null-safety override for hashing: a standalone comparer
/// marker, then the hash marker's comparer, then the equality marker's.
fn hash_comparer(attributes: &MemberAttributes) -> (Option<&ComparerRef>, Option<NullSafety>) {
    if let Some(marker) = &attributes.equality_comparer {
        return (Some(&marker.comparer), Some(marker.null_safety));
    }
    if let Some(marker) = &attributes.hash_code {
        if let Some(comparer) = &marker.comparer {
            return (Some(comparer), Some(marker.null_safety));
        }
    }
    if let Some(comparer) = attributes.equals.as_ref().and_then(|m| m.comparer.as_ref()) {
        let member_override = attributes
            .hash_code
            .as_ref()
            .map(|m| m.null_safety)
            .or_else(|| attributes.equals.as_ref().map(|m| m.null_safety));
        return (Some(comparer), member_override);
    }
    (None, attributes.hash_code.as_ref().map(|m| m.null_safety))
}
