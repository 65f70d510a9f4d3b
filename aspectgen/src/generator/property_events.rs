//! Change-notifying property generator.
//!
//! Every field marked for change notification gets a public property whose
//! setter raises `PropertyChanging` before and/or `PropertyChanged` after
//! the assignment. Events, raise methods and interfaces are only added when
//! the type (or an ancestor) does not already provide them.

use std::collections::BTreeSet;

use tracing::debug;

use crate::analysis::TypeShapeQuery;
use crate::error::{GenerationError, GenerationResult};
use crate::ir::{MemberDescriptor, MethodSignature, NotifyMarker, NullSafety, TypeDescriptor};
use crate::resolver::{is_null_safe, resolve_equality};

use super::snippets::{
    escape_literal, inequality_fragment, property_name_from_field, unconflicting_name, BodyWriter,
};
use super::traits::{GeneratorConfig, MethodGenerator};

const COMPONENT_MODEL: &str = "System.ComponentModel";

/// One of the two notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notification {
    Changing,
    Changed,
}

impl Notification {
    fn event(self) -> &'static str {
        match self {
            Notification::Changing => "PropertyChanging",
            Notification::Changed => "PropertyChanged",
        }
    }

    fn interface(self) -> &'static str {
        match self {
            Notification::Changing => "INotifyPropertyChanging",
            Notification::Changed => "INotifyPropertyChanged",
        }
    }

    fn raise_method(self) -> &'static str {
        match self {
            Notification::Changing => "RaisePropertyChanging",
            Notification::Changed => "RaisePropertyChanged",
        }
    }

    fn marker(self, field: &MemberDescriptor) -> Option<NotifyMarker> {
        match self {
            Notification::Changing => field.attributes.notify_changing,
            Notification::Changed => field.attributes.notify_changed,
        }
    }
}

const NOTIFICATIONS: [Notification; 2] = [Notification::Changing, Notification::Changed];

#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyEventsGenerator;

impl PropertyEventsGenerator {
    fn notifying_fields(ty: &TypeDescriptor) -> impl Iterator<Item = &MemberDescriptor> {
        ty.members.iter().filter(|m| m.attributes.generates_property())
    }

    fn uses(ty: &TypeDescriptor, notification: Notification) -> bool {
        Self::notifying_fields(ty).any(|m| notification.marker(m).is_some())
    }

    fn has_event(ty: &TypeDescriptor, notification: Notification) -> bool {
        std::iter::once(ty)
            .chain(ty.ancestors())
            .any(|t| t.events.iter().any(|e| e == notification.event()))
    }

    fn has_raise_method(ty: &TypeDescriptor, notification: Notification) -> bool {
        std::iter::once(ty)
            .chain(ty.ancestors())
            .flat_map(|t| t.methods.iter())
            .any(|m| m.name == notification.raise_method() && is_raise_signature(m))
    }

    fn implements(ty: &TypeDescriptor, notification: Notification) -> bool {
        let interface = notification.interface();
        ty.shape
            .implements(&format!("{}.{}", COMPONENT_MODEL, interface))
            || ty.shape.implements(interface)
    }

    fn validate(ty: &TypeDescriptor, generator: &str) -> GenerationResult<()> {
        let taken = ty.member_names();
        for member in Self::notifying_fields(ty) {
            if !member.is_field() {
                return Err(GenerationError::invalid_descriptor(
                    &ty.full_name,
                    generator,
                    format!("'{}' must be a field to notify changes", member.name),
                ));
            }
            if member.is_static {
                return Err(GenerationError::invalid_descriptor(
                    &ty.full_name,
                    generator,
                    format!("static field '{}' cannot notify changes", member.name),
                ));
            }
            let property = property_name_from_field(&member.name);
            if property.is_empty() || taken.contains(property.as_str()) {
                return Err(GenerationError::invalid_descriptor(
                    &ty.full_name,
                    generator,
                    format!(
                        "property '{}' generated for '{}' conflicts with an existing member",
                        property, member.name
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// A usable raise method takes the property name first and nothing else
/// without a default.
fn is_raise_signature(method: &MethodSignature) -> bool {
    let Some((first, rest)) = method.parameters.split_first() else {
        return false;
    };
    let first_is_string = matches!(
        first.type_name.trim_end_matches('?'),
        "string" | "String" | "System.String"
    );
    first_is_string && rest.iter().all(|p| p.has_default)
}

impl MethodGenerator for PropertyEventsGenerator {
    fn id(&self) -> &'static str {
        "property-events"
    }

    fn name(&self) -> &'static str {
        "PropertyEvent"
    }

    fn applies_to(&self, ty: &TypeDescriptor) -> bool {
        Self::notifying_fields(ty).next().is_some()
    }

    fn dependencies(&self, _ty: &TypeDescriptor) -> Vec<String> {
        vec![format!("using {};", COMPONENT_MODEL)]
    }

    fn interfaces_to_add(&self, ty: &TypeDescriptor) -> Vec<String> {
        NOTIFICATIONS
            .into_iter()
            .filter(|n| Self::uses(ty, *n) && !Self::implements(ty, *n))
            .map(|n| n.interface().to_string())
            .collect()
    }

    fn type_body(&self, ty: &TypeDescriptor, config: &GeneratorConfig) -> GenerationResult<String> {
        Self::validate(ty, self.name())?;

        let mut writer = BodyWriter::new(config.indent);
        for notification in NOTIFICATIONS {
            if Self::uses(ty, notification) && !Self::has_event(ty, notification) {
                writer
                    .line(
                        0,
                        format!(
                            "public event {}EventHandler {};",
                            notification.event(),
                            notification.event()
                        ),
                    )
                    .blank();
            }
        }

        let taken = ty.member_names();
        let mut first = true;
        for field in Self::notifying_fields(ty) {
            if !first {
                writer.blank();
            }
            first = false;
            render_property(&mut writer, ty, field, &taken, config);
        }

        for notification in NOTIFICATIONS {
            if Self::uses(ty, notification) && !Self::has_raise_method(ty, notification) {
                let modifiers = if ty.is_reference_type() {
                    "protected virtual"
                } else {
                    "private"
                };
                writer
                    .blank()
                    .line(
                        0,
                        format!(
                            "{} void {}(string propertyName)",
                            modifiers,
                            notification.raise_method()
                        ),
                    )
                    .line(0, "{")
                    .line(
                        1,
                        format!(
                            "{}?.Invoke(this, new {}EventArgs(propertyName));",
                            notification.event(),
                            notification.event()
                        ),
                    )
                    .line(0, "}");
            }
        }

        debug!(
            type_name = %ty.full_name,
            properties = Self::notifying_fields(ty).count(),
            "rendering notifying properties"
        );
        Ok(writer.finish())
    }
}

fn render_property(
    writer: &mut BodyWriter,
    ty: &TypeDescriptor,
    field: &MemberDescriptor,
    taken: &BTreeSet<&str>,
    config: &GeneratorConfig,
) {
    let property = property_name_from_field(&field.name);
    let annotated = field.ty.has_nullable_annotation();

    if annotated {
        writer.raw("#nullable enable");
    }
    writer
        .line(0, format!("public {} {}", field.ty.display_name, property))
        .line(0, "{")
        .line(1, format!("get => {};", field.name))
        .line(1, "set")
        .line(1, "{");

    let setter = Setter {
        field: &field.name,
        property: &property,
        changing: Notification::Changing.marker(field),
        changed: Notification::Changed.marker(field),
        differs: |a: &str, b: &str| {
            let null_safe = is_null_safe(NullSafety::Auto, ty.nullable_context, &field.ty);
            let plan = resolve_equality(&field.ty, None, null_safe);
            inequality_fragment(&plan, a, b, &config.runtime_namespace)
        },
    };
    setter.render(writer, taken);

    writer.line(1, "}").line(0, "}");
    if annotated {
        writer.raw("#nullable restore");
    }
}

/// Setter body of one notifying property, emitted at depth 2.
struct Setter<'a, F> {
    field: &'a str,
    property: &'a str,
    changing: Option<NotifyMarker>,
    changed: Option<NotifyMarker>,
    differs: F,
}

impl<F> Setter<'_, F>
where
    F: Fn(&str, &str) -> String,
{
    fn raise_call(&self, notification: Notification) -> String {
        format!(
            "{}(\"{}\");",
            notification.raise_method(),
            escape_literal(self.property)
        )
    }

    fn assign(&self) -> String {
        format!("{} = value;", self.field)
    }

    fn render(&self, writer: &mut BodyWriter, taken: &BTreeSet<&str>) {
        let changed_check = self.changed.map(|m| m.equality_check);

        match self.changing {
            None => self.render_after_only(writer, changed_check),
            Some(changing) if !changing.equality_check => {
                self.render_unguarded_before(writer, changed_check, taken)
            }
            Some(_) => self.render_guarded_before(writer, changed_check),
        }
    }

    /// Only the after-notification, optionally guarded.
    fn render_after_only(&self, writer: &mut BodyWriter, changed_check: Option<bool>) {
        if changed_check == Some(true) {
            writer
                .line(2, format!("if ({})", (self.differs)(self.field, "value")))
                .line(2, "{")
                .line(3, self.assign())
                .line(3, self.raise_call(Notification::Changed))
                .line(2, "}");
        } else {
            writer.line(2, self.assign());
            if changed_check.is_some() {
                writer.line(2, self.raise_call(Notification::Changed));
            }
        }
    }

    /// Before-notification without a guard; an after-notification guard
    /// compares a copy of the old value with the new one.
    fn render_unguarded_before(
        &self,
        writer: &mut BodyWriter,
        changed_check: Option<bool>,
        taken: &BTreeSet<&str>,
    ) {
        writer.line(2, self.raise_call(Notification::Changing));
        match changed_check {
            Some(true) => {
                let temp = unconflicting_name("temp", taken);
                writer
                    .line(2, format!("var {} = {};", temp, self.field))
                    .line(2, self.assign())
                    .line(2, format!("if ({})", (self.differs)(&temp, "value")))
                    .line(2, "{")
                    .line(3, self.raise_call(Notification::Changed))
                    .line(2, "}");
            }
            Some(false) => {
                writer
                    .line(2, self.assign())
                    .line(2, self.raise_call(Notification::Changed));
            }
            None => {
                writer.line(2, self.assign());
            }
        }
    }

    /// Before-notification behind a guard. An unguarded after-notification
    /// moves the assignment out of the guard.
    fn render_guarded_before(&self, writer: &mut BodyWriter, changed_check: Option<bool>) {
        writer
            .line(2, format!("if ({})", (self.differs)(self.field, "value")))
            .line(2, "{")
            .line(3, self.raise_call(Notification::Changing));
        if changed_check != Some(false) {
            writer.line(3, self.assign());
        }
        if changed_check == Some(true) {
            writer.line(3, self.raise_call(Notification::Changed));
        }
        writer.line(2, "}");

        if changed_check == Some(false) {
            writer
                .line(2, self.assign())
                .line(2, self.raise_call(Notification::Changed));
        }
    }
}
