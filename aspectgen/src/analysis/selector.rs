//! Member selection.
//!
//! Picks the ordered, duplicate-free list of data members a generator works
//! on. Under [`MemberSelection::Merged`] a field that backs a property (see
//! [`backing_field`]) and that property form one datum: the pair is excluded
//! if either side is excluded, explicitly included if either side is marked,
//! and represented by the kind the generator prefers.

use tracing::trace;

use super::backing::backing_field;
use crate::ir::{MarkerFamily, MemberAttributes, MemberDescriptor, MemberSelection};

/// Kind that represents a linked field/property pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberPriority {
    Field,
    Property,
}

/// A participating member.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedMember<'a> {
    /// Representative member; its name is used in generated code
    pub member: &'a MemberDescriptor,

    /// The other half of a linked pair
    pub partner: Option<&'a MemberDescriptor>,

    /// Markers of both halves, the representative's winning
    pub attributes: MemberAttributes,
}

impl<'a> SelectedMember<'a> {
    fn new(member: &'a MemberDescriptor, partner: Option<&'a MemberDescriptor>) -> Self {
        let attributes = match partner {
            Some(partner) => member.attributes.merged_with(&partner.attributes),
            None => member.attributes.clone(),
        };
        Self {
            member,
            partner,
            attributes,
        }
    }

    pub fn name(&self) -> &'a str {
        &self.member.name
    }
}

/// Selects participating members for one marker family.
#[derive(Debug, Clone, Copy)]
pub struct MemberSelector {
    family: MarkerFamily,
    selection: MemberSelection,
    priority: MemberPriority,
    explicit_only: bool,
}

impl MemberSelector {
    pub fn new(family: MarkerFamily, selection: MemberSelection, priority: MemberPriority) -> Self {
        Self {
            family,
            selection,
            priority,
            explicit_only: false,
        }
    }

    /// Only members carrying the family's include marker participate.
    pub fn explicit_only(mut self, explicit_only: bool) -> Self {
        self.explicit_only = explicit_only;
        self
    }

    /// Select from `members` in declaration order.
    pub fn select<'a, I>(&self, members: I) -> Vec<SelectedMember<'a>>
    where
        I: IntoIterator<Item = &'a MemberDescriptor>,
    {
        self.select_with(members, |_| true)
    }

    /// Select from `members`, additionally requiring `filter` for members
    /// that are not explicitly included.
    pub fn select_with<'a, I, F>(&self, members: I, filter: F) -> Vec<SelectedMember<'a>>
    where
        I: IntoIterator<Item = &'a MemberDescriptor>,
        F: Fn(&MemberDescriptor) -> bool,
    {
        let candidates: Vec<&'a MemberDescriptor> = members
            .into_iter()
            .filter(|m| !m.is_static && m.is_readable())
            .collect();

        let groups = self.group(&candidates);
        let mut selected = Vec::with_capacity(groups.len());

        for group in groups {
            if group.iter().any(|m| m.attributes.excludes(self.family)) {
                trace!(member = %group[0].name, "excluded by marker");
                continue;
            }

            let explicit = group.iter().any(|m| m.attributes.includes(self.family));
            if self.explicit_only && !explicit {
                continue;
            }

            let eligible: Vec<&'a MemberDescriptor> = if explicit {
                group.clone()
            } else {
                group
                    .iter()
                    .copied()
                    .filter(|m| self.kind_allowed(m) && filter(*m))
                    .collect()
            };

            let Some(representative) = self.representative(&eligible) else {
                trace!(member = %group[0].name, "filtered out");
                continue;
            };
            let partner = group
                .iter()
                .copied()
                .find(|m| !std::ptr::eq(*m, representative));

            trace!(member = %representative.name, linked = partner.is_some(), "selected");
            selected.push(SelectedMember::new(representative, partner));
        }

        selected
    }

    fn kind_allowed(&self, member: &MemberDescriptor) -> bool {
        match self.selection {
            MemberSelection::Fields => member.is_field(),
            MemberSelection::Properties => member.is_property(),
            MemberSelection::Merged => true,
        }
    }

    fn representative<'a>(&self, eligible: &[&'a MemberDescriptor]) -> Option<&'a MemberDescriptor> {
        let preferred = eligible.iter().copied().find(|m| match self.priority {
            MemberPriority::Field => m.is_field(),
            MemberPriority::Property => m.is_property(),
        });
        preferred.or_else(|| eligible.first().copied())
    }

    /// Group candidates into singletons and linked pairs, ordered by the
    /// earliest declaration in each group.
    fn group<'a>(&self, candidates: &[&'a MemberDescriptor]) -> Vec<Vec<&'a MemberDescriptor>> {
        let mut links: Vec<Option<usize>> = vec![None; candidates.len()];

        if self.selection == MemberSelection::Merged {
            for (prop_idx, property) in candidates.iter().enumerate() {
                let Some(field_name) = property.getter_body().and_then(backing_field) else {
                    continue;
                };
                let field_idx = candidates
                    .iter()
                    .position(|m| m.is_field() && m.name == field_name);
                if let Some(field_idx) = field_idx {
                    if links[field_idx].is_none() && links[prop_idx].is_none() {
                        links[field_idx] = Some(prop_idx);
                        links[prop_idx] = Some(field_idx);
                    }
                }
            }
        }

        let mut groups = Vec::new();
        for (idx, member) in candidates.iter().enumerate() {
            match links[idx] {
                Some(other) if other < idx => continue,
                Some(other) => groups.push(vec![*member, candidates[other]]),
                None => groups.push(vec![*member]),
            }
        }
        groups
    }
}
