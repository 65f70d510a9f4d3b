//! `Equals(object)` generator.

use tracing::debug;

use crate::analysis::{MemberPriority, MemberSelector};
use crate::error::GenerationResult;
use crate::ir::{MarkerFamily, TypeDescriptor};
use crate::resolver::StrategyResolver;

use super::snippets::{conjunct, equality_fragment, unconflicting_name, BodyWriter};
use super::traits::{GeneratorConfig, MethodGenerator};
use super::{requested, resolve_settings};

/// Generates a value-equality override.
///
/// ```text
/// public override bool Equals(object obj)
/// {
///   return obj == this || obj is Point other
///     && base.Equals(obj)
///     && X == other.X
///     && Y == other.Y;
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualsGenerator;

impl MethodGenerator for EqualsGenerator {
    fn id(&self) -> &'static str {
        "equals"
    }

    fn name(&self) -> &'static str {
        "Equals"
    }

    fn applies_to(&self, ty: &TypeDescriptor) -> bool {
        requested(ty, MarkerFamily::Equals)
    }

    fn type_body(&self, ty: &TypeDescriptor, config: &GeneratorConfig) -> GenerationResult<String> {
        let settings = resolve_settings(ty, MarkerFamily::Equals, config);
        let members = MemberSelector::new(
            MarkerFamily::Equals,
            settings.member_selection,
            MemberPriority::Field,
        )
        .explicit_only(ty.attributes.auto_equals.is_none())
        .select(&ty.members);
        let resolver = StrategyResolver::new(ty, &settings);

        let taken = ty.member_names();
        let obj = unconflicting_name("obj", &taken);
        let other = unconflicting_name("other", &taken);

        let mut conditions = Vec::with_capacity(members.len() + 1);
        if resolver.include_base_equals() {
            conditions.push(format!("base.Equals({})", obj));
        }
        for member in &members {
            let plan = resolver.equality(member);
            let theirs = format!("{}.{}", other, member.name());
            conditions.push(conjunct(equality_fragment(
                &plan,
                member.name(),
                &theirs,
                &config.runtime_namespace,
            )));
        }
        debug!(
            type_name = %ty.full_name,
            members = members.len(),
            "rendering Equals"
        );

        let mut head = String::from("return ");
        if ty.is_reference_type() {
            head.push_str(&format!("{} == this || ", obj));
        }
        head.push_str(&format!("{} is {}", obj, ty.name));
        if !members.is_empty() {
            head.push_str(&format!(" {}", other));
        }

        let parameter = if ty.nullable_context { "object?" } else { "object" };
        let mut writer = BodyWriter::new(config.indent);
        if ty.nullable_context {
            writer.raw("#nullable enable");
        }
        writer
            .line(0, format!("public override bool Equals({} {})", parameter, obj))
            .line(0, "{");

        if conditions.is_empty() {
            writer.line(1, format!("{};", head));
        } else {
            writer.line(1, head);
            let last = conditions.len() - 1;
            for (idx, condition) in conditions.iter().enumerate() {
                let end = if idx == last { ";" } else { "" };
                writer.line(2, format!("&& {}{}", condition, end));
            }
        }

        writer.line(0, "}");
        if ty.nullable_context {
            writer.raw("#nullable restore");
        }
        Ok(writer.finish())
    }
}
