//! Comparison and hashing strategies.
//!
//! Both decision tables are total: every member type ends up with exactly
//! one strategy, and the same inputs always give the same one.

use crate::analysis::TypeShapeQuery;
use crate::ir::TypeShape;

/// How two member values are compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EqualityStrategy {
    /// `a == b`
    Operator,
    /// `a.Equals(b)`
    Method,
    /// Ordered sequence with native element equality
    Sequence,
    /// Sequence compared element by element, recursively
    DeepSequence,
    /// Array with more than one dimension
    MultiDimArray,
    /// `new C().Equals(a, b)`
    Comparer {
        comparer: String,
        /// Non-reference nullable: compare `.Value` behind a presence check
        unwrap_nullable: bool,
    },
}

/// Equality strategy plus null guarding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualityPlan {
    pub strategy: EqualityStrategy,
    pub null_safe: bool,
}

/// How a member contributes to the hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashStrategy {
    /// The value itself is handed to the hash builder
    PassThrough,
    /// Combined hash of an ordered sequence
    Combined,
    /// Combined hash computed element by element, recursively
    DeepCombined,
    /// `new C().GetHashCode(a)`
    Comparer {
        comparer: String,
        unwrap_nullable: bool,
    },
}

/// Hash strategy plus null guarding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashPlan {
    pub strategy: HashStrategy,
    pub null_safe: bool,
}

fn unwraps_nullable(ty: &TypeShape) -> bool {
    !ty.is_reference_type && ty.has_nullable_annotation()
}

/// Pick the equality strategy for a member of type `ty`.
pub fn resolve_equality(ty: &TypeShape, comparer: Option<&str>, null_safe: bool) -> EqualityPlan {
    if let Some(comparer) = comparer {
        return EqualityPlan {
            strategy: EqualityStrategy::Comparer {
                comparer: comparer.to_string(),
                unwrap_nullable: unwraps_nullable(ty),
            },
            null_safe: null_safe && ty.is_reference_type,
        };
    }

    if ty.can_use_equality_operators_by_default() {
        return EqualityPlan {
            strategy: EqualityStrategy::Operator,
            null_safe: false,
        };
    }

    let strategy = if ty.overrides_equals() {
        EqualityStrategy::Method
    } else if ty.has_native_sequence_equality() {
        EqualityStrategy::Sequence
    } else if ty.is_multi_dimensional_array() {
        EqualityStrategy::MultiDimArray
    } else if ty.is_enumerable() {
        EqualityStrategy::DeepSequence
    } else {
        EqualityStrategy::Method
    };

    let null_safe = match strategy {
        EqualityStrategy::Method => null_safe && ty.is_reference_type,
        _ => null_safe,
    };
    EqualityPlan {
        strategy,
        null_safe,
    }
}

/// Pick the hash strategy for a member of type `ty`.
pub fn resolve_hash(ty: &TypeShape, comparer: Option<&str>, null_safe: bool) -> HashPlan {
    let null_safe = null_safe && (ty.is_reference_type || ty.has_nullable_annotation());

    if let Some(comparer) = comparer {
        return HashPlan {
            strategy: HashStrategy::Comparer {
                comparer: comparer.to_string(),
                unwrap_nullable: unwraps_nullable(ty),
            },
            null_safe: null_safe && ty.is_reference_type,
        };
    }

    let strategy = if ty.can_use_equality_operators_by_default() || ty.overrides_get_hash_code() {
        HashStrategy::PassThrough
    } else if ty.has_native_sequence_equality() {
        HashStrategy::Combined
    } else if ty.is_enumerable() {
        HashStrategy::DeepCombined
    } else {
        HashStrategy::PassThrough
    };

    let null_safe = match strategy {
        HashStrategy::PassThrough => false,
        _ => null_safe,
    };
    HashPlan {
        strategy,
        null_safe,
    }
}

/// Render a comparer name relative to the type it is used in.
///
/// `App.Order.ByIdComparer` used inside `App.Order` becomes `ByIdComparer`.
pub fn reduce_comparer_name<'a>(containing_type: &str, comparer: &'a str) -> &'a str {
    comparer
        .strip_prefix(containing_type)
        .and_then(|rest| rest.strip_prefix('.'))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(comparer)
}
