//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `aspectgen.toml` files
//! and merging with command-line arguments.

use crate::error::{CliResult, ConfigError};
use aspectgen::ir::{BaseCallPolicy, MemberSelection, NullSafety};
use aspectgen::resolver::{Settings, SettingsLayer};
use aspectgen::{GeneratorConfig, IndentStyle, LineEnding};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "aspectgen.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,

    /// Layout of the generated source.
    pub format: FormatConfig,

    /// Settings applied where a type does not decide.
    pub defaults: DefaultsConfig,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the generated `.g.cs` files.
    pub dir: PathBuf,
}

/// Formatting configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// `spaces2`, `spaces4` or `tabs`.
    pub indent: String,

    /// `lf` or `crlf`.
    pub line_ending: String,

    /// Namespace of the sequence and hashing helpers.
    pub runtime_namespace: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub member_selection: Option<MemberSelection>,
    pub base_call: Option<BaseCallPolicy>,
    pub null_safety: Option<NullSafety>,
    pub cache_hash_code: Option<bool>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent: "spaces2".to_string(),
            line_ending: "lf".to_string(),
            runtime_namespace: aspectgen::generator::DEFAULT_RUNTIME_NAMESPACE.to_string(),
        }
    }
}

impl Config {
    /// Build the library configuration, validating the string options.
    pub fn to_generator_config(&self) -> CliResult<GeneratorConfig> {
        let indent = match self.format.indent.as_str() {
            "spaces2" => IndentStyle::Spaces2,
            "spaces4" => IndentStyle::Spaces4,
            "tabs" => IndentStyle::Tabs,
            other => {
                return Err(ConfigError::invalid_value(
                    "format.indent",
                    format!("expected spaces2, spaces4 or tabs, found '{}'", other),
                )
                .into())
            }
        };

        let line_ending = match self.format.line_ending.as_str() {
            "lf" => LineEnding::Lf,
            "crlf" => LineEnding::CrLf,
            other => {
                return Err(ConfigError::invalid_value(
                    "format.line_ending",
                    format!("expected lf or crlf, found '{}'", other),
                )
                .into())
            }
        };

        if self.format.runtime_namespace.trim().is_empty() {
            return Err(
                ConfigError::invalid_value("format.runtime_namespace", "must not be empty").into(),
            );
        }

        let layer = SettingsLayer {
            member_selection: self.defaults.member_selection,
            base_call: self.defaults.base_call,
            null_safety: self.defaults.null_safety,
            cache_result: self.defaults.cache_hash_code,
            accessibility: None,
        };

        Ok(GeneratorConfig::default()
            .with_indent(indent)
            .with_line_ending(line_ending)
            .with_runtime_namespace(self.format.runtime_namespace.trim())
            .with_defaults(Settings::default().apply(&layer)))
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// Without a path the default file in the working directory is tried;
    /// a missing file yields the default configuration.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        Self::parse(&content, &config_path)
    }

    /// Parse configuration text; `origin` only labels errors.
    pub fn parse(content: &str, origin: &Path) -> CliResult<Config> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ConfigError::invalid_toml(origin.to_path_buf(), e.to_string()))?;
        Ok(config)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }

        if let Some(ref indent) = args.indent {
            config.format.indent = indent.clone();
        }

        if let Some(ref line_ending) = args.line_ending {
            config.format.line_ending = line_ending.clone();
        }

        if let Some(ref namespace) = args.runtime_namespace {
            config.format.runtime_namespace = namespace.clone();
        }

        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# aspectgen configuration file

[output]
# Directory receiving the generated .g.cs files
dir = "./generated"

[format]
# Indentation: spaces2, spaces4 or tabs
indent = "spaces2"

# Line endings: lf or crlf
line_ending = "lf"

# Namespace of the sequence and hashing helpers referenced by generated code
runtime_namespace = "AspectGen.Runtime"

[defaults]
# Used where neither the type nor the member decides.
# Members considered: fields, properties or merged
# member_selection = "merged"

# Consult the base implementation: always, never or auto
# base_call = "auto"

# Null guards on comparisons: on, off or auto
# null_safety = "auto"

# Keep the computed hash in a private slot
# cache_hash_code = false
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Indentation override.
    pub indent: Option<String>,

    /// Line ending override.
    pub line_ending: Option<String>,

    /// Runtime namespace override.
    pub runtime_namespace: Option<String>,
}
