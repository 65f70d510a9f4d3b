//! `GetHashCode()` generator.
//!
//! Folds a type-name seed, the optional base hash and every participating
//! member. Up to [`COMBINE_LIMIT`] values go through a single
//! `System.HashCode.Combine` call; beyond that an accumulator is used.

use tracing::debug;

use crate::analysis::{MemberPriority, MemberSelector};
use crate::error::GenerationResult;
use crate::ir::{MarkerFamily, TypeDescriptor};
use crate::resolver::StrategyResolver;

use super::snippets::{escape_literal, hash_operand, unconflicting_name, BodyWriter};
use super::traits::{GeneratorConfig, MethodGenerator};
use super::{requested, resolve_settings};

/// Most values `System.HashCode.Combine` accepts.
pub const COMBINE_LIMIT: usize = 8;

#[derive(Debug, Clone, Copy, Default)]
pub struct HashCodeGenerator;

impl MethodGenerator for HashCodeGenerator {
    fn id(&self) -> &'static str {
        "hash-code"
    }

    fn name(&self) -> &'static str {
        "GetHashCode"
    }

    fn applies_to(&self, ty: &TypeDescriptor) -> bool {
        requested(ty, MarkerFamily::HashCode)
    }

    fn type_body(&self, ty: &TypeDescriptor, config: &GeneratorConfig) -> GenerationResult<String> {
        let settings = resolve_settings(ty, MarkerFamily::HashCode, config);
        let members = MemberSelector::new(
            MarkerFamily::HashCode,
            settings.member_selection,
            MemberPriority::Field,
        )
        .explicit_only(ty.attributes.auto_hash_code.is_none())
        .select(&ty.members);
        let resolver = StrategyResolver::new(ty, &settings);

        let mut operands = Vec::with_capacity(members.len() + 2);
        operands.push(format!("\"{}\"", escape_literal(&ty.full_name)));
        if resolver.include_base_hash() {
            operands.push("base.GetHashCode()".to_string());
        }
        for member in &members {
            let plan = resolver.hash(member);
            operands.push(hash_operand(&plan, member.name(), &config.runtime_namespace));
        }

        let taken = ty.member_names();
        let slot = settings
            .cache_result
            .then(|| unconflicting_name("_storedHashCode", &taken));
        debug!(
            type_name = %ty.full_name,
            operands = operands.len(),
            cached = slot.is_some(),
            "rendering GetHashCode"
        );

        let mut writer = BodyWriter::new(config.indent);
        if let Some(slot) = &slot {
            writer.line(0, format!("private int? {};", slot)).blank();
        }
        writer
            .line(0, "public override int GetHashCode()")
            .line(0, "{");

        if operands.len() <= COMBINE_LIMIT {
            let (open, close) = match &slot {
                Some(slot) => (
                    format!("{} ??= System.HashCode.Combine(", slot),
                    Some(format!("return {}.Value;", slot)),
                ),
                None => ("return System.HashCode.Combine(".to_string(), None),
            };
            writer.line(1, open);
            let last = operands.len() - 1;
            for (idx, operand) in operands.iter().enumerate() {
                let end = if idx == last { ");" } else { "," };
                writer.line(2, format!("{}{}", operand, end));
            }
            if let Some(close) = close {
                writer.line(1, close);
            }
        } else {
            let hash = unconflicting_name("hash", &taken);
            if let Some(slot) = &slot {
                writer
                    .line(1, format!("if ({}.HasValue)", slot))
                    .line(2, format!("return {}.Value;", slot))
                    .blank();
            }
            writer.line(1, format!("var {} = new System.HashCode();", hash));
            for operand in &operands {
                writer.line(1, format!("{}.Add({});", hash, operand));
            }
            match &slot {
                Some(slot) => {
                    writer
                        .line(1, format!("{} = {}.ToHashCode();", slot, hash))
                        .line(1, format!("return {}.Value;", slot));
                }
                None => {
                    writer.line(1, format!("return {}.ToHashCode();", hash));
                }
            }
        }

        writer.line(0, "}");
        Ok(writer.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{AutoHashCode, MemberDescriptor, TypeAttributes, TypeShape};

    fn with_fields(count: usize, cache: bool) -> TypeDescriptor {
        let mut ty = TypeDescriptor::new("Wide", Some("App")).with_attributes(TypeAttributes {
            auto_hash_code: Some(AutoHashCode {
                cache_result: Some(cache),
                ..Default::default()
            }),
            ..Default::default()
        });
        for idx in 0..count {
            ty = ty.with_member(MemberDescriptor::field(
                format!("F{}", idx),
                TypeShape::primitive("int"),
            ));
        }
        ty
    }

    #[test]
    fn test_combine_form() {
        let body = HashCodeGenerator
            .type_body(&with_fields(2, false), &GeneratorConfig::default())
            .unwrap();
        assert_eq!(
            body,
            "public override int GetHashCode()\n\
             {\n\
             \x20 return System.HashCode.Combine(\n\
             \x20   \"App.Wide\",\n\
             \x20   F0,\n\
             \x20   F1);\n\
             }"
        );
    }

    #[test]
    fn test_seed_only() {
        let body = HashCodeGenerator
            .type_body(&with_fields(0, false), &GeneratorConfig::default())
            .unwrap();
        assert!(body.contains("return System.HashCode.Combine(\n    \"App.Wide\");"));
    }

    #[test]
    fn test_threshold() {
        let config = GeneratorConfig::default();

        let seven = HashCodeGenerator.type_body(&with_fields(7, false), &config).unwrap();
        assert!(seven.contains("System.HashCode.Combine("));
        assert!(!seven.contains("new System.HashCode()"));

        let eight = HashCodeGenerator.type_body(&with_fields(8, false), &config).unwrap();
        assert!(eight.contains("var hash = new System.HashCode();"));
        assert!(eight.contains("  hash.Add(\"App.Wide\");\n  hash.Add(F0);"));
        assert!(eight.contains("  hash.Add(F7);\n  return hash.ToHashCode();"));
    }

    #[test]
    fn test_cached_combine() {
        let body = HashCodeGenerator
            .type_body(&with_fields(1, true), &GeneratorConfig::default())
            .unwrap();
        assert_eq!(
            body,
            "private int? _storedHashCode;\n\
             \n\
             public override int GetHashCode()\n\
             {\n\
             \x20 _storedHashCode ??= System.HashCode.Combine(\n\
             \x20   \"App.Wide\",\n\
             \x20   F0);\n\
             \x20 return _storedHashCode.Value;\n\
             }"
        );
    }

    #[test]
    fn test_cached_accumulator_avoids_member_names() {
        let ty = with_fields(9, true)
            .with_member(MemberDescriptor::field("hash", TypeShape::primitive("int")))
            .with_member(MemberDescriptor::field(
                "_storedHashCode",
                TypeShape::primitive("int"),
            ));
        let body = HashCodeGenerator
            .type_body(&ty, &GeneratorConfig::default())
            .unwrap();

        assert!(body.starts_with("private int? _storedHashCode1;\n\n"));
        assert!(body.contains("  if (_storedHashCode1.HasValue)\n    return _storedHashCode1.Value;\n\n"));
        assert!(body.contains("var hash1 = new System.HashCode();"));
        assert!(body.contains("hash1.Add(hash);"));
        assert!(body.contains("_storedHashCode1 = hash1.ToHashCode();\n  return _storedHashCode1.Value;"));
    }
}
