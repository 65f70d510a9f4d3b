//! # aspectgen
//!
//! Synthesizes the bodies of `Equals`, `GetHashCode`, `ToString` and
//! change-notifying properties for annotated C# partial types.
//!
//! The host compiler hands over a [`TypeDescriptor`](ir::TypeDescriptor) per
//! annotated type. Each descriptor flows through a fixed pipeline:
//!
//! - [`analysis::shape`] answers structural questions about member types
//! - [`analysis::selector`] picks the participating members
//! - [`resolver`] decides null handling, comparison and hashing per member
//! - [`generator`] renders method bodies and wraps them in a partial type
//!
//! [`Synthesizer`] runs every registered generator over a type and collects
//! the generated files together with the diagnostics for skipped types.
//!
//! ```rust,ignore
//! use aspectgen::{GeneratorConfig, Synthesizer};
//!
//! let synthesizer = Synthesizer::new(GeneratorConfig::default());
//! let outcome = synthesizer.synthesize(&descriptor);
//! for file in &outcome.generated {
//!     println!("{}:\n{}", file.file_name, file.code);
//! }
//! ```

pub mod analysis;
pub mod error;
pub mod generator;
pub mod ir;
pub mod resolver;
pub mod synthesizer;

pub use error::{GenerationError, GenerationResult};
pub use generator::{GeneratedCode, GeneratorConfig, IndentStyle, LineEnding, MethodGenerator};
pub use ir::{MemberDescriptor, TypeDescriptor, TypeShape};
pub use synthesizer::{Synthesizer, TypeOutcome};
