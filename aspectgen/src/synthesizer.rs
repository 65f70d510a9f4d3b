//! Per-type synthesis driver.
//!
//! Runs every registered generator that applies to a type. A diagnostic
//! from one generator never stops the others.

use tracing::{debug, instrument};

use crate::error::GenerationError;
use crate::generator::{
    EqualsGenerator, GeneratedCode, GeneratorConfig, HashCodeGenerator, MethodGenerator,
    PropertyEventsGenerator, ToStringGenerator,
};
use crate::ir::TypeDescriptor;

/// Everything produced for one type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeOutcome {
    /// Full name of the type
    pub type_name: String,

    /// One file per generator that ran successfully, in registration order
    pub generated: Vec<GeneratedCode>,

    /// Generators skipped for this type
    pub diagnostics: Vec<GenerationError>,
}

impl TypeOutcome {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Holds the generators and the configuration they share.
pub struct Synthesizer {
    generators: Vec<Box<dyn MethodGenerator>>,
    config: GeneratorConfig,
}

impl std::fmt::Debug for Synthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Synthesizer")
            .field(
                "generators",
                &self.generators.iter().map(|g| g.id()).collect::<Vec<_>>(),
            )
            .field("config", &self.config)
            .finish()
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl Synthesizer {
    /// Create a synthesizer with the built-in generators.
    pub fn new(config: GeneratorConfig) -> Self {
        Self::empty(config)
            .with_generator(EqualsGenerator)
            .with_generator(HashCodeGenerator)
            .with_generator(ToStringGenerator)
            .with_generator(PropertyEventsGenerator)
    }

    /// Create a synthesizer without generators.
    pub fn empty(config: GeneratorConfig) -> Self {
        Self {
            generators: Vec::new(),
            config,
        }
    }

    /// Register an additional generator.
    pub fn with_generator(mut self, generator: impl MethodGenerator + 'static) -> Self {
        self.generators.push(Box::new(generator));
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Identifiers of the registered generators.
    pub fn generator_ids(&self) -> Vec<&'static str> {
        self.generators.iter().map(|g| g.id()).collect()
    }

    /// Run every applicable generator over `ty`.
    #[instrument(skip_all, fields(type_name = %ty.full_name))]
    pub fn synthesize(&self, ty: &TypeDescriptor) -> TypeOutcome {
        let mut outcome = TypeOutcome {
            type_name: ty.full_name.clone(),
            ..Default::default()
        };

        for generator in self.generators.iter().filter(|g| g.applies_to(ty)) {
            match generator.generate(ty, &self.config) {
                Ok(code) => {
                    debug!(generator = generator.id(), file = %code.file_name, "generated");
                    outcome.generated.push(code);
                }
                Err(err) => {
                    debug!(generator = generator.id(), code = err.code(), %err, "skipped");
                    outcome.diagnostics.push(err);
                }
            }
        }

        outcome
    }

    /// Synthesize a batch of types in order.
    pub fn synthesize_all<'a, I>(&self, types: I) -> Vec<TypeOutcome>
    where
        I: IntoIterator<Item = &'a TypeDescriptor>,
    {
        types.into_iter().map(|ty| self.synthesize(ty)).collect()
    }
}
