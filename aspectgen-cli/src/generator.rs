//! Batch generation over loaded descriptors.
//!
//! Types are synthesized in parallel; results keep the input order so the
//! output is the same on every run.

use crate::loader::LoadedType;
use aspectgen::{GenerationError, GeneratorConfig, Synthesizer};
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::info;

/// One generated source file, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub relative_path: PathBuf,
    pub content: String,
    pub type_name: String,
}

/// A generator that declined a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Descriptor file declaring the type.
    pub source: PathBuf,
    pub error: GenerationError,
}

/// Everything produced for a batch of types.
#[derive(Debug, Clone, Default)]
pub struct GeneratedOutput {
    pub files: Vec<OutputFile>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GeneratedOutput {
    /// Number of distinct types that produced at least one file.
    pub fn type_count(&self) -> usize {
        let mut names: Vec<&str> = self.files.iter().map(|f| f.type_name.as_str()).collect();
        names.dedup();
        names.len()
    }
}

/// Runs the synthesizer over a batch of descriptors.
#[derive(Debug)]
pub struct BatchGenerator {
    synthesizer: Synthesizer,
}

impl BatchGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            synthesizer: Synthesizer::new(config),
        }
    }

    pub fn generate(&self, types: &[LoadedType]) -> GeneratedOutput {
        let outcomes: Vec<_> = types
            .par_iter()
            .map(|ty| (ty, self.synthesizer.synthesize(&ty.descriptor)))
            .collect();

        let mut output = GeneratedOutput::default();
        for (ty, outcome) in outcomes {
            output
                .files
                .extend(outcome.generated.into_iter().map(|code| OutputFile {
                    relative_path: PathBuf::from(&code.file_name),
                    content: code.code,
                    type_name: code.type_name,
                }));
            output
                .diagnostics
                .extend(outcome.diagnostics.into_iter().map(|error| Diagnostic {
                    source: ty.source.clone(),
                    error,
                }));
        }

        info!(
            types = types.len(),
            files = output.files.len(),
            diagnostics = output.diagnostics.len(),
            "generation finished"
        );
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aspectgen::ir::{AutoEquals, AutoHashCode, TypeAttributes};
    use aspectgen::{MemberDescriptor, TypeDescriptor, TypeShape};

    fn loaded(name: &str) -> LoadedType {
        let descriptor = TypeDescriptor::new(name, Some("App"))
            .with_attributes(TypeAttributes {
                auto_equals: Some(AutoEquals::default()),
                auto_hash_code: Some(AutoHashCode::default()),
                ..Default::default()
            })
            .with_member(MemberDescriptor::field("_id", TypeShape::primitive("int")));
        LoadedType {
            descriptor,
            source: PathBuf::from(format!("{}.json", name)),
        }
    }

    #[test]
    fn test_output_keeps_input_order() {
        let types: Vec<_> = ["Order", "Customer", "Address"]
            .iter()
            .map(|n| loaded(n))
            .collect();
        let output = BatchGenerator::new(GeneratorConfig::default()).generate(&types);

        let paths: Vec<_> = output
            .files
            .iter()
            .map(|f| f.relative_path.to_string_lossy().to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "App/Order-Equals.g.cs",
                "App/Order-GetHashCode.g.cs",
                "App/Customer-Equals.g.cs",
                "App/Customer-GetHashCode.g.cs",
                "App/Address-Equals.g.cs",
                "App/Address-GetHashCode.g.cs",
            ]
        );
        assert_eq!(output.type_count(), 3);
    }

    #[test]
    fn test_diagnostics_carry_source() {
        let mut nested = loaded("Inner");
        nested.descriptor = nested.descriptor.with_nested(true);
        let output = BatchGenerator::new(GeneratorConfig::default()).generate(&[nested]);

        assert!(output.files.is_empty());
        assert_eq!(output.diagnostics.len(), 2);
        assert_eq!(output.diagnostics[0].source, PathBuf::from("Inner.json"));
        assert_eq!(output.diagnostics[0].error.code(), "AG0001");
    }
}
