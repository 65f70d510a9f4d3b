//! Code generators.
//!
//! One [`MethodGenerator`] per synthesized aspect:
//!
//! | id                | file suffix     | adds                                    |
//! |-------------------|-----------------|-----------------------------------------|
//! | `equals`          | `Equals`        | `Equals(object)` override               |
//! | `hash-code`       | `GetHashCode`   | `GetHashCode()` override, optional cache |
//! | `to-string`       | `ToString`      | `ToString()` override                   |
//! | `property-events` | `PropertyEvent` | notifying properties, events, raisers   |

pub mod equals;
pub mod hash_code;
pub mod partial_type;
pub mod property_events;
pub mod snippets;
pub mod to_string;
pub mod traits;

pub use equals::EqualsGenerator;
pub use hash_code::HashCodeGenerator;
pub use partial_type::{generated_file_name, PartialType};
pub use property_events::PropertyEventsGenerator;
pub use to_string::ToStringGenerator;
pub use traits::{
    GeneratedCode, GeneratorConfig, IndentStyle, LineEnding, MethodGenerator,
    DEFAULT_RUNTIME_NAMESPACE,
};

use crate::ir::{MarkerFamily, TypeDescriptor};
use crate::resolver::{Settings, SettingsLayer};

/// A family applies when the type is configured for it or any member
/// carries its include marker.
pub(crate) fn requested(ty: &TypeDescriptor, family: MarkerFamily) -> bool {
    ty.attributes.has_config(family) || ty.members.iter().any(|m| m.attributes.includes(family))
}

/// Configured defaults overlaid with the type-level marker of `family`.
pub(crate) fn resolve_settings(
    ty: &TypeDescriptor,
    family: MarkerFamily,
    config: &GeneratorConfig,
) -> Settings {
    let layer = match family {
        MarkerFamily::Equals => ty.attributes.auto_equals.as_ref().map(SettingsLayer::from),
        MarkerFamily::HashCode => ty.attributes.auto_hash_code.as_ref().map(SettingsLayer::from),
        MarkerFamily::ToString => ty.attributes.auto_to_string.as_ref().map(SettingsLayer::from),
    };
    Settings::resolve(&config.defaults, layer.iter())
}
