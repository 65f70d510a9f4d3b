//! C# snippet assembly.
//!
//! Pure string builders shared by the generators: comparison fragments,
//! hash operands, unconflicting names and a small line writer.

use std::collections::BTreeSet;

use crate::resolver::{EqualityPlan, EqualityStrategy, HashPlan, HashStrategy};

use super::traits::IndentStyle;

// =============================================================================
// Body writer
// =============================================================================

/// Collects indented lines of a type body.
#[derive(Debug, Clone)]
pub struct BodyWriter {
    indent: IndentStyle,
    lines: Vec<String>,
}

impl BodyWriter {
    pub fn new(indent: IndentStyle) -> Self {
        Self {
            indent,
            lines: Vec::new(),
        }
    }

    /// Append `text` at `depth`.
    pub fn line(&mut self, depth: usize, text: impl AsRef<str>) -> &mut Self {
        self.lines
            .push(format!("{}{}", self.indent.indent(depth), text.as_ref()));
        self
    }

    /// Append a line without indentation.
    pub fn raw(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(text.into());
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}

// =============================================================================
// Comparison fragments
// =============================================================================

fn sequence_helper(strategy: &EqualityStrategy, runtime: &str) -> String {
    match strategy {
        EqualityStrategy::DeepSequence => format!("{}.Sequences.DeepSequenceEqual", runtime),
        EqualityStrategy::MultiDimArray => format!("{}.Arrays.DeepArrayEqual", runtime),
        _ => "System.Linq.Enumerable.SequenceEqual".to_string(),
    }
}

/// Expression that is true when `a` equals `b`.
pub fn equality_fragment(plan: &EqualityPlan, a: &str, b: &str, runtime: &str) -> String {
    match &plan.strategy {
        EqualityStrategy::Operator => format!("{a} == {b}"),
        EqualityStrategy::Method if plan.null_safe => {
            format!("{a} == null && {b} == null || {a}?.Equals({b}) == true")
        }
        EqualityStrategy::Method => format!("{a}.Equals({b})"),
        strategy @ (EqualityStrategy::Sequence
        | EqualityStrategy::DeepSequence
        | EqualityStrategy::MultiDimArray) => {
            let call = format!("{}({a}, {b})", sequence_helper(strategy, runtime));
            if plan.null_safe {
                format!("{a} == {b} || {a} != null && {b} != null && {call}")
            } else {
                call
            }
        }
        EqualityStrategy::Comparer {
            comparer,
            unwrap_nullable: true,
        } => format!(
            "{a}.HasValue == {b}.HasValue && (!{a}.HasValue || new {comparer}().Equals({a}.Value, {b}.Value))"
        ),
        EqualityStrategy::Comparer { comparer, .. } if plan.null_safe => format!(
            "{a} == null && {b} == null || {a} != null && {b} != null && new {comparer}().Equals({a}, {b})"
        ),
        EqualityStrategy::Comparer { comparer, .. } => {
            format!("new {comparer}().Equals({a}, {b})")
        }
    }
}

/// Expression that is true when `a` differs from `b`; the exact negation of
/// [`equality_fragment`].
pub fn inequality_fragment(plan: &EqualityPlan, a: &str, b: &str, runtime: &str) -> String {
    match &plan.strategy {
        EqualityStrategy::Operator => format!("{a} != {b}"),
        EqualityStrategy::Method if plan.null_safe => {
            format!("{a} != null && !{a}.Equals({b}) || {a} == null && {b} != null")
        }
        EqualityStrategy::Method => format!("!{a}.Equals({b})"),
        strategy @ (EqualityStrategy::Sequence
        | EqualityStrategy::DeepSequence
        | EqualityStrategy::MultiDimArray) => {
            let call = format!("{}({a}, {b})", sequence_helper(strategy, runtime));
            if plan.null_safe {
                format!("{a} != {b} && ({a} == null || {b} == null || !{call})")
            } else {
                format!("!{call}")
            }
        }
        EqualityStrategy::Comparer {
            comparer,
            unwrap_nullable: true,
        } => format!(
            "{a}.HasValue != {b}.HasValue || {a}.HasValue && !new {comparer}().Equals({a}.Value, {b}.Value)"
        ),
        EqualityStrategy::Comparer { comparer, .. } if plan.null_safe => format!(
            "({a} != null || {b} != null) && ({a} == null || {b} == null || !new {comparer}().Equals({a}, {b}))"
        ),
        EqualityStrategy::Comparer { comparer, .. } => {
            format!("!new {comparer}().Equals({a}, {b})")
        }
    }
}

/// Parenthesize a fragment that contains a top-level disjunction so it can
/// sit inside a conjunction.
pub fn conjunct(fragment: String) -> String {
    if fragment.contains("||") {
        format!("({})", fragment)
    } else {
        fragment
    }
}

// =============================================================================
// Hash operands
// =============================================================================

/// Value handed to the hash builder for member `a`.
pub fn hash_operand(plan: &HashPlan, a: &str, runtime: &str) -> String {
    let (call, unwrapped) = match &plan.strategy {
        HashStrategy::PassThrough => return a.to_string(),
        HashStrategy::Combined => (format!("{}.HashCodes.CombinedHashCode({})", runtime, a), false),
        HashStrategy::DeepCombined => (
            format!("{}.HashCodes.DeepCombinedHashCode({})", runtime, a),
            false,
        ),
        HashStrategy::Comparer {
            comparer,
            unwrap_nullable: true,
        } => (format!("new {}().GetHashCode({}.Value)", comparer, a), true),
        HashStrategy::Comparer { comparer, .. } => {
            (format!("new {}().GetHashCode({})", comparer, a), false)
        }
    };

    if unwrapped {
        format!("({a}.HasValue ? {call} : 0)")
    } else if plan.null_safe {
        format!("({a} == null ? 0 : {call})")
    } else {
        call
    }
}

// =============================================================================
// Names
// =============================================================================

/// First of `candidate`, `candidate1`, `candidate2`, ... not in `taken`.
pub fn unconflicting_name(candidate: &str, taken: &BTreeSet<&str>) -> String {
    if !taken.contains(candidate) {
        return candidate.to_string();
    }
    (1u32..)
        .map(|n| format!("{}{}", candidate, n))
        .find(|name| !taken.contains(name.as_str()))
        .unwrap_or_else(|| candidate.to_string())
}

/// Property name for a backing field: leading underscores dropped and a
/// leading lowercase ASCII letter capitalized.
pub fn property_name_from_field(field: &str) -> String {
    let trimmed = field.trim_start_matches('_');
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            let mut name = String::with_capacity(trimmed.len());
            name.push(first.to_ascii_uppercase());
            name.push_str(chars.as_str());
            name
        }
        _ => trimmed.to_string(),
    }
}

/// Escape literal text for an interpolated string.
pub fn escape_interpolated(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '{' => escaped.push_str("{{"),
            '}' => escaped.push_str("}}"),
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Escape text for a regular string literal.
pub fn escape_literal(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RT: &str = "AspectGen.Runtime";

    fn eq(strategy: EqualityStrategy, null_safe: bool) -> EqualityPlan {
        EqualityPlan {
            strategy,
            null_safe,
        }
    }

    #[test]
    fn test_operator_and_method_fragments() {
        let op = eq(EqualityStrategy::Operator, false);
        assert_eq!(equality_fragment(&op, "X", "other.X", RT), "X == other.X");
        assert_eq!(inequality_fragment(&op, "X", "other.X", RT), "X != other.X");

        let method = eq(EqualityStrategy::Method, false);
        assert_eq!(equality_fragment(&method, "M", "other.M", RT), "M.Equals(other.M)");
        assert_eq!(inequality_fragment(&method, "M", "other.M", RT), "!M.Equals(other.M)");

        let guarded = eq(EqualityStrategy::Method, true);
        assert_eq!(
            equality_fragment(&guarded, "M", "other.M", RT),
            "M == null && other.M == null || M?.Equals(other.M) == true"
        );
        assert_eq!(
            inequality_fragment(&guarded, "_m", "value", RT),
            "_m != null && !_m.Equals(value) || _m == null && value != null"
        );
    }

    #[test]
    fn test_sequence_fragments() {
        let plain = eq(EqualityStrategy::Sequence, false);
        assert_eq!(
            equality_fragment(&plain, "A", "other.A", RT),
            "System.Linq.Enumerable.SequenceEqual(A, other.A)"
        );

        let deep = eq(EqualityStrategy::DeepSequence, true);
        assert_eq!(
            equality_fragment(&deep, "A", "other.A", RT),
            "A == other.A || A != null && other.A != null && AspectGen.Runtime.Sequences.DeepSequenceEqual(A, other.A)"
        );
        assert_eq!(
            inequality_fragment(&deep, "_a", "value", RT),
            "_a != value && (_a == null || value == null || !AspectGen.Runtime.Sequences.DeepSequenceEqual(_a, value))"
        );

        let grid = eq(EqualityStrategy::MultiDimArray, false);
        assert_eq!(
            inequality_fragment(&grid, "G", "other.G", "Acme"),
            "!Acme.Arrays.DeepArrayEqual(G, other.G)"
        );
    }

    #[test]
    fn test_comparer_fragments() {
        let comparer = |unwrap_nullable, null_safe| {
            eq(
                EqualityStrategy::Comparer {
                    comparer: "NameComparer".to_string(),
                    unwrap_nullable,
                },
                null_safe,
            )
        };

        assert_eq!(
            equality_fragment(&comparer(false, false), "N", "other.N", RT),
            "new NameComparer().Equals(N, other.N)"
        );
        assert_eq!(
            equality_fragment(&comparer(true, false), "N", "other.N", RT),
            "N.HasValue == other.N.HasValue && (!N.HasValue || new NameComparer().Equals(N.Value, other.N.Value))"
        );
        assert_eq!(
            equality_fragment(&comparer(false, true), "N", "other.N", RT),
            "N == null && other.N == null || N != null && other.N != null && new NameComparer().Equals(N, other.N)"
        );
        assert_eq!(
            inequality_fragment(&comparer(false, true), "_n", "value", RT),
            "(_n != null || value != null) && (_n == null || value == null || !new NameComparer().Equals(_n, value))"
        );
    }

    #[test]
    fn test_conjunct_parenthesizes_disjunctions() {
        assert_eq!(conjunct("X == other.X".to_string()), "X == other.X");
        assert_eq!(conjunct("a || b".to_string()), "(a || b)");
    }

    #[test]
    fn test_hash_operands() {
        let plan = |strategy, null_safe| HashPlan {
            strategy,
            null_safe,
        };

        assert_eq!(hash_operand(&plan(HashStrategy::PassThrough, true), "X", RT), "X");
        assert_eq!(
            hash_operand(&plan(HashStrategy::Combined, false), "A", RT),
            "AspectGen.Runtime.HashCodes.CombinedHashCode(A)"
        );
        assert_eq!(
            hash_operand(&plan(HashStrategy::DeepCombined, true), "Items", RT),
            "(Items == null ? 0 : AspectGen.Runtime.HashCodes.DeepCombinedHashCode(Items))"
        );
        assert_eq!(
            hash_operand(
                &plan(
                    HashStrategy::Comparer {
                        comparer: "C".to_string(),
                        unwrap_nullable: true,
                    },
                    false
                ),
                "N",
                RT
            ),
            "(N.HasValue ? new C().GetHashCode(N.Value) : 0)"
        );
    }

    #[test]
    fn test_unconflicting_name() {
        let taken: BTreeSet<&str> = ["hash", "hash1", "other"].into_iter().collect();
        assert_eq!(unconflicting_name("hash", &taken), "hash2");
        assert_eq!(unconflicting_name("obj", &taken), "obj");
        assert_eq!(unconflicting_name("other", &taken), "other1");
    }

    #[test]
    fn test_property_name_from_field() {
        assert_eq!(property_name_from_field("_name"), "Name");
        assert_eq!(property_name_from_field("__count"), "Count");
        assert_eq!(property_name_from_field("value"), "Value");
        assert_eq!(property_name_from_field("_Total"), "Total");
        assert_eq!(property_name_from_field("_ärger"), "ärger");
    }

    #[test]
    fn test_escape_interpolated() {
        assert_eq!(escape_interpolated(r#"a{b}"c\"#), r#"a{{b}}\"c\\"#);
    }

    #[test]
    fn test_body_writer() {
        let mut writer = BodyWriter::new(IndentStyle::Spaces4);
        writer.line(0, "if (x)").line(1, "y();").blank().raw("#nullable restore");
        assert_eq!(writer.finish(), "if (x)\n    y();\n\n#nullable restore");
    }
}
