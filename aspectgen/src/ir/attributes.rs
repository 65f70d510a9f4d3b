//! Configuration markers attached to types and members.
//!
//! Type-level markers switch a generator on for a type and carry its
//! defaults. Every setting is optional: an unset value falls through to the
//! next layer (see [`crate::resolver::settings`]). Member-level markers
//! include, exclude or tune a single member.

use serde::{Deserialize, Serialize};

use super::types::Accessibility;

fn is_false(value: &bool) -> bool {
    !*value
}

/// Null-handling policy for comparisons and hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullSafety {
    Off,
    On,
    /// Guard only where the nullable context cannot rule out null
    #[default]
    Auto,
}

/// Whether the generated method also consults the base implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseCallPolicy {
    #[serde(alias = "on")]
    Always,
    #[serde(alias = "off")]
    Never,
    #[default]
    Auto,
}

/// Which kinds of data members participate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberSelection {
    Fields,
    Properties,
    /// Fields and properties, with backing fields merged into their property
    #[default]
    Merged,
}

/// Family of markers a generator reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerFamily {
    Equals,
    HashCode,
    ToString,
}

/// Reference to an equality comparer type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparerRef {
    /// Fully qualified comparer type name
    pub name: String,

    /// Whether its two-argument `Equals` takes nullable operands on both sides
    #[serde(default)]
    pub accepts_nullable: bool,
}

impl ComparerRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accepts_nullable: false,
        }
    }

    pub fn accepting_nullable(mut self) -> Self {
        self.accepts_nullable = true;
        self
    }
}

/// Includes a member in equality and tunes its comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EqualsMarker {
    #[serde(default)]
    pub null_safety: NullSafety,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparer: Option<ComparerRef>,
}

/// Includes a member in hashing and tunes its hash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashCodeMarker {
    #[serde(default)]
    pub null_safety: NullSafety,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparer: Option<ComparerRef>,
}

/// Shared comparer marker honoured by both equality and hashing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparerMarker {
    pub comparer: ComparerRef,

    #[serde(default)]
    pub null_safety: NullSafety,
}

/// Includes a member in string conversion and tunes its rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToStringMarker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Format provider type, instantiated with its default constructor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_provider: Option<String>,
}

/// Requests a notifying property for a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyMarker {
    /// Only notify when the assigned value differs from the current one
    #[serde(default)]
    pub equality_check: bool,
}

impl NotifyMarker {
    pub fn checked() -> Self {
        Self {
            equality_check: true,
        }
    }
}

/// Markers attached to a member. At most one marker of each kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<EqualsMarker>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub equals_exclude: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_code: Option<HashCodeMarker>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub hash_code_exclude: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equality_comparer: Option<ComparerMarker>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_string: Option<ToStringMarker>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub to_string_exclude: bool,

    /// Never null, whatever the declared type says
    #[serde(default, skip_serializing_if = "is_false")]
    pub not_null: bool,

    /// May be null, whatever the declared type says
    #[serde(default, skip_serializing_if = "is_false")]
    pub maybe_null: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_changed: Option<NotifyMarker>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_changing: Option<NotifyMarker>,
}

impl MemberAttributes {
    /// Whether the member carries the include marker of `family`.
    pub fn includes(&self, family: MarkerFamily) -> bool {
        match family {
            MarkerFamily::Equals => self.equals.is_some(),
            MarkerFamily::HashCode => self.hash_code.is_some(),
            MarkerFamily::ToString => self.to_string.is_some(),
        }
    }

    /// Whether the member carries the exclude marker of `family`.
    pub fn excludes(&self, family: MarkerFamily) -> bool {
        match family {
            MarkerFamily::Equals => self.equals_exclude,
            MarkerFamily::HashCode => self.hash_code_exclude,
            MarkerFamily::ToString => self.to_string_exclude,
        }
    }

    /// Whether a notifying property is generated from this field.
    pub fn generates_property(&self) -> bool {
        self.notify_changed.is_some() || self.notify_changing.is_some()
    }

    /// Combine the markers of a field/property pair. `self` wins where both
    /// sides carry the same kind of marker.
    pub fn merged_with(&self, other: &MemberAttributes) -> MemberAttributes {
        MemberAttributes {
            equals: self.equals.clone().or_else(|| other.equals.clone()),
            equals_exclude: self.equals_exclude || other.equals_exclude,
            hash_code: self.hash_code.clone().or_else(|| other.hash_code.clone()),
            hash_code_exclude: self.hash_code_exclude || other.hash_code_exclude,
            equality_comparer: self
                .equality_comparer
                .clone()
                .or_else(|| other.equality_comparer.clone()),
            to_string: self.to_string.clone().or_else(|| other.to_string.clone()),
            to_string_exclude: self.to_string_exclude || other.to_string_exclude,
            not_null: self.not_null || other.not_null,
            maybe_null: self.maybe_null || other.maybe_null,
            notify_changed: self.notify_changed.or(other.notify_changed),
            notify_changing: self.notify_changing.or(other.notify_changing),
        }
    }
}

/// Type-level equality configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoEquals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_selection: Option<MemberSelection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_call: Option<BaseCallPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_safety: Option<NullSafety>,
}

/// Type-level hash configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoHashCode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_selection: Option<MemberSelection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_call: Option<BaseCallPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_safety: Option<NullSafety>,

    /// Compute the hash once and keep it in a private slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_result: Option<bool>,
}

/// Type-level string conversion configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoToString {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_selection: Option<MemberSelection>,

    /// Accessibilities a member must have to be listed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<Vec<Accessibility>>,
}

/// Markers attached to a type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_equals: Option<AutoEquals>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_hash_code: Option<AutoHashCode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_to_string: Option<AutoToString>,
}

impl TypeAttributes {
    /// Whether the type carries the type-level marker of `family`.
    pub fn has_config(&self, family: MarkerFamily) -> bool {
        match family {
            MarkerFamily::Equals => self.auto_equals.is_some(),
            MarkerFamily::HashCode => self.auto_hash_code.is_some(),
            MarkerFamily::ToString => self.auto_to_string.is_some(),
        }
    }
}
