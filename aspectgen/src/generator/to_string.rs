//! `ToString()` generator.

use std::collections::BTreeSet;

use tracing::debug;

use crate::analysis::{MemberPriority, MemberSelector, SelectedMember, TypeShapeQuery};
use crate::error::GenerationResult;
use crate::ir::{Accessibility, MarkerFamily, MemberDescriptor, TypeDescriptor};

use super::snippets::{escape_interpolated, escape_literal, BodyWriter};
use super::traits::{GeneratorConfig, MethodGenerator};
use super::{requested, resolve_settings};

/// Generates `return $"(Point){{X: {X}, Y: {Y}}}";`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToStringGenerator;

impl MethodGenerator for ToStringGenerator {
    fn id(&self) -> &'static str {
        "to-string"
    }

    fn name(&self) -> &'static str {
        "ToString"
    }

    fn applies_to(&self, ty: &TypeDescriptor) -> bool {
        requested(ty, MarkerFamily::ToString)
    }

    fn type_body(&self, ty: &TypeDescriptor, config: &GeneratorConfig) -> GenerationResult<String> {
        let settings = resolve_settings(ty, MarkerFamily::ToString, config);
        let visible = &settings.accessibility;
        let candidates = candidates(ty);

        let members = MemberSelector::new(
            MarkerFamily::ToString,
            settings.member_selection,
            MemberPriority::Property,
        )
        .explicit_only(ty.attributes.auto_to_string.is_none())
        .select_with(candidates, |m| {
            visible.contains(&m.read_accessibility())
                && (!m.ty.is_enumerable() || m.ty.overrides_to_string())
        });
        debug!(type_name = %ty.full_name, members = members.len(), "rendering ToString");

        let mut text = format!("({})", escape_interpolated(&ty.name));
        if !members.is_empty() {
            let parts: Vec<String> = members.iter().map(render_member).collect();
            text.push_str(&format!("{{{{{}}}}}", parts.join(", ")));
        }

        let mut writer = BodyWriter::new(config.indent);
        writer
            .line(0, "public override string ToString()")
            .line(0, "{")
            .line(1, format!("return $\"{}\";", text))
            .line(0, "}");
        Ok(writer.finish())
    }
}

/// Inherited non-private members, root ancestor first, followed by the
/// type's own members. A name declared closer to the type hides the same
/// name further up.
fn candidates(ty: &TypeDescriptor) -> Vec<&MemberDescriptor> {
    let mut seen: BTreeSet<&str> = ty.members.iter().map(|m| m.name.as_str()).collect();
    let mut inherited: Vec<Vec<&MemberDescriptor>> = Vec::new();

    for ancestor in ty.ancestors() {
        let visible: Vec<&MemberDescriptor> = ancestor
            .members
            .iter()
            .filter(|m| m.accessibility.effective() != Accessibility::Private)
            .filter(|m| !seen.contains(m.name.as_str()))
            .collect();
        seen.extend(ancestor.members.iter().map(|m| m.name.as_str()));
        inherited.push(visible);
    }

    inherited
        .into_iter()
        .rev()
        .flatten()
        .chain(ty.members.iter())
        .collect()
}

fn render_member(selected: &SelectedMember<'_>) -> String {
    let member = selected.member;
    let marker = selected.attributes.to_string.as_ref();
    let label = marker
        .and_then(|m| m.label.as_deref())
        .unwrap_or(member.name.as_str());

    let format = marker.and_then(|m| m.format.as_deref());
    let provider = marker.and_then(|m| m.format_provider.as_deref());
    let access = if member.ty.is_reference_type || member.ty.has_nullable_annotation() {
        "?."
    } else {
        "."
    };
    let value = match (format, provider) {
        (_, Some(provider)) => {
            let arguments = match format {
                Some(format) => format!("\"{}\", new {}()", escape_literal(format), provider),
                None => format!("new {}()", provider),
            };
            format!("{{{}{}ToString({})}}", member.name, access, arguments)
        }
        (Some(format), None) if is_inline_format(format) => {
            format!("{{{}:{}}}", member.name, format)
        }
        (Some(format), None) => format!(
            "{{{}{}ToString(\"{}\")}}",
            member.name,
            access,
            escape_literal(format)
        ),
        (None, None) => format!("{{{}}}", member.name),
    };

    format!("{}: {}", escape_interpolated(label), value)
}

/// Whether `format` can sit in an interpolation hole after `:`.
fn is_inline_format(format: &str) -> bool {
    !format.contains(['{', '}', '"', '\\'])
}
