//! # aspectgen-cli
//!
//! CLI library for generating C# object method bodies from type descriptor
//! files.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`scanner`] - Descriptor file discovery and filtering
//! - [`loader`] - JSON descriptor loading
//! - [`generator`] - Parallel synthesis over loaded descriptors
//! - [`writer`] - File output, dry-run and up-to-date checks
//! - [`logging`] - Tracing subscriber setup
//! - [`error`] - Error types and handling

pub mod config;
pub mod error;
pub mod generator;
pub mod loader;
pub mod logging;
pub mod scanner;
pub mod writer;

pub use config::{Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use generator::BatchGenerator;
pub use loader::{DescriptorLoader, LoadedType};
pub use scanner::{SourceFile, SourceScanner};
pub use writer::FileWriter;
