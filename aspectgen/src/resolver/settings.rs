//! Layered generator settings.
//!
//! Settings are resolved by folding partial layers over a complete set of
//! defaults, left to right: built-in defaults, then the configured defaults,
//! then the type-level marker. A later layer wins wherever it sets a value.

use serde::{Deserialize, Serialize};

use crate::ir::{
    Accessibility, AutoEquals, AutoHashCode, AutoToString, BaseCallPolicy, MemberSelection,
    NullSafety,
};

/// Fully resolved settings for one generator and one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub member_selection: MemberSelection,
    pub base_call: BaseCallPolicy,
    pub null_safety: NullSafety,
    pub cache_result: bool,
    pub accessibility: Vec<Accessibility>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            member_selection: MemberSelection::Merged,
            base_call: BaseCallPolicy::Auto,
            null_safety: NullSafety::Auto,
            cache_result: false,
            accessibility: vec![Accessibility::Public],
        }
    }
}

impl Settings {
    /// Apply one layer on top of these settings.
    pub fn apply(mut self, layer: &SettingsLayer) -> Self {
        if let Some(selection) = layer.member_selection {
            self.member_selection = selection;
        }
        if let Some(base_call) = layer.base_call {
            self.base_call = base_call;
        }
        if let Some(null_safety) = layer.null_safety {
            self.null_safety = null_safety;
        }
        if let Some(cache) = layer.cache_result {
            self.cache_result = cache;
        }
        if let Some(ref accessibility) = layer.accessibility {
            self.accessibility = accessibility.clone();
        }
        self
    }

    /// Fold `layers` over `defaults`, left to right.
    pub fn resolve<'a>(
        defaults: &Settings,
        layers: impl IntoIterator<Item = &'a SettingsLayer>,
    ) -> Settings {
        layers
            .into_iter()
            .fold(defaults.clone(), |settings, layer| settings.apply(layer))
    }
}

/// A partial set of settings; unset values fall through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsLayer {
    pub member_selection: Option<MemberSelection>,
    pub base_call: Option<BaseCallPolicy>,
    pub null_safety: Option<NullSafety>,
    pub cache_result: Option<bool>,
    pub accessibility: Option<Vec<Accessibility>>,
}

impl From<&AutoEquals> for SettingsLayer {
    fn from(config: &AutoEquals) -> Self {
        Self {
            member_selection: config.member_selection,
            base_call: config.base_call,
            null_safety: config.null_safety,
            ..Default::default()
        }
    }
}

impl From<&AutoHashCode> for SettingsLayer {
    fn from(config: &AutoHashCode) -> Self {
        Self {
            member_selection: config.member_selection,
            base_call: config.base_call,
            null_safety: config.null_safety,
            cache_result: config.cache_result,
            ..Default::default()
        }
    }
}

impl From<&AutoToString> for SettingsLayer {
    fn from(config: &AutoToString) -> Self {
        Self {
            member_selection: config.member_selection,
            accessibility: config.accessibility.clone(),
            ..Default::default()
        }
    }
}
