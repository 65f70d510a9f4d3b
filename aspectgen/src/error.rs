//! Error types for the synthesis crate.
//!
//! Structural problems with an annotated type are reported as diagnostics:
//! generation is skipped for that type and generator only, every other
//! pairing still runs.

use thiserror::Error;

/// Result type alias for generation.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Error raised while generating code for a single type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Nested types cannot be extended through a top-level partial declaration.
    #[error("{generator}: nested type '{type_name}' is not supported")]
    NestedType {
        type_name: String,
        generator: String,
    },

    /// The annotated type lacks the `partial` modifier.
    #[error("{generator}: type '{type_name}' must be declared partial")]
    MissingPartialModifier {
        type_name: String,
        generator: String,
    },

    /// The descriptor violates an attribute usage rule.
    #[error("{generator}: invalid descriptor for '{type_name}': {message}")]
    InvalidDescriptor {
        type_name: String,
        generator: String,
        message: String,
    },
}

impl GenerationError {
    /// Create a nested type diagnostic.
    pub fn nested_type(type_name: impl Into<String>, generator: impl Into<String>) -> Self {
        Self::NestedType {
            type_name: type_name.into(),
            generator: generator.into(),
        }
    }

    /// Create a missing partial modifier diagnostic.
    pub fn missing_partial(type_name: impl Into<String>, generator: impl Into<String>) -> Self {
        Self::MissingPartialModifier {
            type_name: type_name.into(),
            generator: generator.into(),
        }
    }

    /// Create an invalid descriptor error.
    pub fn invalid_descriptor(
        type_name: impl Into<String>,
        generator: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidDescriptor {
            type_name: type_name.into(),
            generator: generator.into(),
            message: message.into(),
        }
    }

    /// Short diagnostic code, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            GenerationError::NestedType { .. } => "AG0001",
            GenerationError::MissingPartialModifier { .. } => "AG0002",
            GenerationError::InvalidDescriptor { .. } => "AG0003",
        }
    }

    /// The type the error was raised for.
    pub fn type_name(&self) -> &str {
        match self {
            GenerationError::NestedType { type_name, .. }
            | GenerationError::MissingPartialModifier { type_name, .. }
            | GenerationError::InvalidDescriptor { type_name, .. } => type_name,
        }
    }
}
