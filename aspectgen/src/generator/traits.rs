//! Method generator trait definition.
//!
//! Every generator turns one [`TypeDescriptor`] into the body of a partial
//! type declaration. The shared [`MethodGenerator::generate`] driver checks
//! the structural preconditions, wraps the body and names the output file.

use crate::error::{GenerationError, GenerationResult};
use crate::ir::TypeDescriptor;
use crate::resolver::Settings;

use super::partial_type::{generated_file_name, PartialType};

/// Trait for method body generators.
///
/// Implementors only render the members they add to the type; the partial
/// declaration around them is produced by [`PartialType`].
///
/// # Example
///
/// ```rust,ignore
/// use aspectgen::generator::{GeneratorConfig, MethodGenerator};
/// use aspectgen::error::GenerationResult;
/// use aspectgen::ir::TypeDescriptor;
///
/// struct Marker;
///
/// impl MethodGenerator for Marker {
///     fn id(&self) -> &'static str { "marker" }
///     fn name(&self) -> &'static str { "Marker" }
///     fn applies_to(&self, _ty: &TypeDescriptor) -> bool { true }
///
///     fn type_body(&self, _ty: &TypeDescriptor, _config: &GeneratorConfig) -> GenerationResult<String> {
///         Ok("public const bool IsMarked = true;".to_string())
///     }
/// }
/// ```
pub trait MethodGenerator: Send + Sync {
    /// Short lowercase identifier (e.g. "equals", "to-string").
    fn id(&self) -> &'static str;

    /// Display name, also used as the output file suffix.
    fn name(&self) -> &'static str;

    /// Whether the type asks for this generator at all.
    fn applies_to(&self, ty: &TypeDescriptor) -> bool;

    /// `using` directives the generated file needs.
    fn dependencies(&self, _ty: &TypeDescriptor) -> Vec<String> {
        Vec::new()
    }

    /// Interfaces appended to the partial declaration.
    fn interfaces_to_add(&self, _ty: &TypeDescriptor) -> Vec<String> {
        Vec::new()
    }

    /// Members added to the type, one indentation level = one nesting level,
    /// starting at depth 0.
    fn type_body(&self, ty: &TypeDescriptor, config: &GeneratorConfig) -> GenerationResult<String>;

    /// Generate the complete file for `ty`.
    ///
    /// Nested and non-partial types are rejected with a diagnostic before
    /// anything is rendered.
    fn generate(
        &self,
        ty: &TypeDescriptor,
        config: &GeneratorConfig,
    ) -> GenerationResult<GeneratedCode> {
        if ty.is_nested {
            return Err(GenerationError::nested_type(&ty.full_name, self.name()));
        }
        if !ty.is_partial {
            return Err(GenerationError::missing_partial(&ty.full_name, self.name()));
        }

        let body = self.type_body(ty, config)?;
        let code = PartialType::new(ty, config)
            .with_dependencies(self.dependencies(ty))
            .with_interfaces(self.interfaces_to_add(ty))
            .render(&body);

        Ok(GeneratedCode::new(code, &ty.full_name, self.name())
            .with_file_name(generated_file_name(ty, self.name())))
    }
}

/// Generator configuration options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Indentation style
    pub indent: IndentStyle,

    /// Line ending style
    pub line_ending: LineEnding,

    /// Namespace holding the sequence and hashing helpers
    pub runtime_namespace: String,

    /// Settings used where neither the type nor the member decides
    pub defaults: Settings,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indent: IndentStyle::default(),
            line_ending: LineEnding::default(),
            runtime_namespace: DEFAULT_RUNTIME_NAMESPACE.to_string(),
            defaults: Settings::default(),
        }
    }
}

/// Runtime namespace used when none is configured.
pub const DEFAULT_RUNTIME_NAMESPACE: &str = "AspectGen.Runtime";

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn with_runtime_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.runtime_namespace = namespace.into();
        self
    }

    pub fn with_defaults(mut self, defaults: Settings) -> Self {
        self.defaults = defaults;
        self
    }

    /// Get the indentation string based on current settings.
    pub fn indent_str(&self) -> &str {
        self.indent.as_str()
    }

    /// Get the line ending string based on current settings.
    pub fn line_ending_str(&self) -> &str {
        self.line_ending.as_str()
    }
}

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentStyle {
    /// Two spaces per level
    #[default]
    Spaces2,

    /// Four spaces per level
    Spaces4,

    /// One tab per level
    Tabs,
}

impl IndentStyle {
    /// Get the indentation string.
    pub fn as_str(&self) -> &str {
        match self {
            IndentStyle::Spaces2 => "  ",
            IndentStyle::Spaces4 => "    ",
            IndentStyle::Tabs => "\t",
        }
    }

    /// Create an indentation string for the given depth.
    pub fn indent(&self, depth: usize) -> String {
        self.as_str().repeat(depth)
    }
}

/// Line ending style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style line endings (LF)
    #[default]
    Lf,

    /// Windows-style line endings (CRLF)
    CrLf,
}

impl LineEnding {
    /// Get the line ending string.
    pub fn as_str(&self) -> &str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    /// The generated code string
    pub code: String,

    /// Full name of the type the code extends
    pub type_name: String,

    /// Display name of the generator that produced it
    pub generator: String,

    /// Relative output path, e.g. `App/Point-Equals.g.cs`
    pub file_name: String,
}

impl GeneratedCode {
    pub fn new(
        code: impl Into<String>,
        type_name: impl Into<String>,
        generator: impl Into<String>,
    ) -> Self {
        let type_name = type_name.into();
        let generator = generator.into();
        let file_name = format!("{}-{}.g.cs", type_name.replace('.', "/"), generator);
        Self {
            code: code.into(),
            type_name,
            generator,
            file_name,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{MemberSelection, NullSafety};

    struct Marker;

    impl MethodGenerator for Marker {
        fn id(&self) -> &'static str {
            "marker"
        }

        fn name(&self) -> &'static str {
            "Marker"
        }

        fn applies_to(&self, _ty: &TypeDescriptor) -> bool {
            true
        }

        fn type_body(
            &self,
            _ty: &TypeDescriptor,
            _config: &GeneratorConfig,
        ) -> GenerationResult<String> {
            Ok("public const bool IsMarked = true;".to_string())
        }
    }

    #[test]
    fn test_generator_config_default() {
        let config = GeneratorConfig::default();
        assert!(matches!(config.indent, IndentStyle::Spaces2));
        assert!(matches!(config.line_ending, LineEnding::Lf));
        assert_eq!(config.runtime_namespace, "AspectGen.Runtime");
        assert_eq!(config.defaults, Settings::default());
    }

    #[test]
    fn test_generator_config_builder() {
        let config = GeneratorConfig::new()
            .with_indent(IndentStyle::Spaces4)
            .with_line_ending(LineEnding::CrLf)
            .with_runtime_namespace("Acme.Runtime")
            .with_defaults(Settings {
                member_selection: MemberSelection::Fields,
                null_safety: NullSafety::On,
                ..Default::default()
            });

        assert_eq!(config.indent_str(), "    ");
        assert_eq!(config.line_ending_str(), "\r\n");
        assert_eq!(config.runtime_namespace, "Acme.Runtime");
        assert_eq!(config.defaults.member_selection, MemberSelection::Fields);
    }

    #[test]
    fn test_indent_style() {
        assert_eq!(IndentStyle::Spaces2.as_str(), "  ");
        assert_eq!(IndentStyle::Spaces4.as_str(), "    ");
        assert_eq!(IndentStyle::Tabs.as_str(), "\t");

        assert_eq!(IndentStyle::Spaces2.indent(2), "    ");
        assert_eq!(IndentStyle::Tabs.indent(3), "\t\t\t");
    }

    #[test]
    fn test_generate_rejects_nested_and_non_partial() {
        let config = GeneratorConfig::default();

        let nested = TypeDescriptor::new("Inner", Some("App")).with_nested(true);
        let err = Marker.generate(&nested, &config).unwrap_err();
        assert_eq!(err, GenerationError::nested_type("App.Inner", "Marker"));

        let sealed = TypeDescriptor::new("Plain", Some("App")).with_partial(false);
        let err = Marker.generate(&sealed, &config).unwrap_err();
        assert_eq!(err, GenerationError::missing_partial("App.Plain", "Marker"));
    }

    #[test]
    fn test_generate_wraps_body() {
        let ty = TypeDescriptor::new("Point", Some("App"));
        let generated = Marker.generate(&ty, &GeneratorConfig::default()).unwrap();

        assert_eq!(generated.type_name, "App.Point");
        assert_eq!(generated.generator, "Marker");
        assert_eq!(generated.file_name, "App/Point-Marker.g.cs");
        assert!(generated
            .code
            .contains("    public const bool IsMarked = true;\n"));
    }
}
