//! Error types for the CLI.
//!
//! Every failure the CLI can report is a variant of [`CliError`]; the
//! sub-errors carry the path or key that caused them.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error during descriptor discovery.
    #[error("Failed to scan input: {0}")]
    Scan(#[from] ScanError),

    /// Error reading a descriptor file.
    #[error("Failed to load descriptors: {0}")]
    Load(#[from] LoadError),

    /// Error loading configuration.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// Error writing output files.
    #[error("Failed to write output: {0}")]
    Write(#[from] WriteError),

    /// Generated files are out of date, or a command precondition failed.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error during descriptor discovery.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Input path does not exist.
    #[error("Input not found: {path}")]
    NotFound { path: PathBuf },

    /// No descriptor files under the input.
    #[error("No descriptor files found in: {path}")]
    NoDescriptors { path: PathBuf },

    /// Invalid filter pattern.
    #[error("Invalid filter pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// IO error during scanning.
    #[error("IO error scanning {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the directory walker.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),
}

/// Error reading a descriptor file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Malformed JSON or a descriptor that does not match the schema.
    #[error("Invalid descriptor in {file}:{line}:{column}: {message}")]
    Json {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// Two descriptors declare the same type.
    #[error("Type '{type_name}' is declared in both {first} and {second}")]
    DuplicateType {
        type_name: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Error loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid TOML syntax.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidToml { path: PathBuf, message: String },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// IO error reading config.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error writing output files.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    pub fn not_found(path: PathBuf) -> Self {
        Self::NotFound { path }
    }

    pub fn no_descriptors(path: PathBuf) -> Self {
        Self::NoDescriptors { path }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

impl LoadError {
    /// Build a JSON error carrying the location reported by serde_json.
    pub fn json(file: PathBuf, err: &serde_json::Error) -> Self {
        Self::Json {
            file,
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

impl ConfigError {
    pub fn invalid_toml(path: PathBuf, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path,
            message: message.into(),
        }
    }

    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}
