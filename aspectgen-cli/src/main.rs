//! # aspectgen
//!
//! CLI tool for generating C# `Equals`, `GetHashCode`, `ToString` and
//! notifying property bodies from type descriptor files.
//!
//! ## Usage
//!
//! ```bash
//! # Generate from descriptors in the current directory
//! aspectgen generate
//!
//! # Generate into a specific output directory
//! aspectgen generate --input ./types --output ./Generated
//!
//! # Preview without writing
//! aspectgen generate --dry-run
//!
//! # Initialize configuration
//! aspectgen init
//!
//! # Fail with exit code 2 when generated files are out of date
//! aspectgen check --input ./types
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use aspectgen_cli::{
    config::{CliArgs, Config, ConfigManager},
    error::CliError,
    generator::{BatchGenerator, GeneratedOutput},
    loader::DescriptorLoader,
    logging,
    scanner::SourceScanner,
    writer::{find_stale, FileWriter, Staleness, WriteResult},
};

#[derive(Parser)]
#[command(name = "aspectgen")]
#[command(author, version, about = "Generate C# object method bodies from type descriptors", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate C# sources from descriptor files
    Generate {
        /// Descriptor file or directory containing descriptor files
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Output directory for generated files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Preview changes without writing files
        #[arg(long)]
        dry_run: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Filter descriptor files by path pattern (glob)
        #[arg(long)]
        filter: Option<String>,

        /// Namespace of the runtime helpers
        #[arg(long)]
        runtime_namespace: Option<String>,
    },

    /// Initialize a new aspectgen configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "aspectgen.toml")]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Check that generated files are up-to-date
    Check {
        /// Descriptor file or directory containing descriptor files
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Directory holding the generated files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Filter descriptor files by path pattern (glob)
        #[arg(long)]
        filter: Option<String>,
    },
}

fn main() -> ExitCode {
    logging::init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            match e {
                CliError::Validation(_) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Generate {
            input,
            output,
            dry_run,
            config,
            filter,
            runtime_namespace,
        } => {
            let args = CliArgs {
                output,
                runtime_namespace,
                ..Default::default()
            };
            let config = load_config(config.as_deref(), &args)?;
            cmd_generate(&input, &config, filter.as_deref(), dry_run)
        }

        Commands::Init { output, force } => cmd_init(output, force),

        Commands::Check {
            input,
            output,
            config,
            filter,
        } => {
            let args = CliArgs {
                output,
                ..Default::default()
            };
            let config = load_config(config.as_deref(), &args)?;
            cmd_check(&input, &config, filter.as_deref())
        }
    }
}

fn load_config(path: Option<&Path>, args: &CliArgs) -> Result<Config, CliError> {
    let config = ConfigManager::load(path)?;
    Ok(ConfigManager::merge_cli_args(config, args))
}

/// Scan, load and synthesize; `None` when there was nothing to do.
fn synthesize(
    input: &Path,
    config: &Config,
    filter: Option<&str>,
) -> Result<Option<GeneratedOutput>, CliError> {
    let generator_config = config.to_generator_config()?;

    println!("{}", "Scanning for descriptor files...".cyan());

    let mut scanner = SourceScanner::new(input);
    if let Some(pattern) = filter {
        scanner = scanner.with_filter(pattern)?;
    }

    let files = scanner.scan_allow_empty()?;
    if files.is_empty() {
        println!("{}", "No descriptor files found.".yellow());
        return Ok(None);
    }

    println!("  Found {} descriptor file(s)", files.len().to_string().green());

    let (types, errors) = DescriptorLoader::new().load_files(&files);
    if !errors.is_empty() {
        println!("{} {} load error(s):", "Warning:".yellow(), errors.len());
        for error in &errors {
            println!("  {}", error);
        }
    }

    if types.is_empty() {
        println!("{}", "No type descriptors loaded.".yellow());
        return Ok(None);
    }

    println!("{}", "Generating sources...".cyan());

    let output = BatchGenerator::new(generator_config).generate(&types);

    for diagnostic in &output.diagnostics {
        println!(
            "  {} {} {} ({})",
            "warning".yellow(),
            diagnostic.error.code().yellow(),
            diagnostic.error,
            diagnostic.source.display()
        );
    }

    println!(
        "  Generated {} file(s) for {} type(s)",
        output.files.len().to_string().green(),
        output.type_count().to_string().green()
    );

    Ok(Some(output))
}

/// Generate command implementation.
fn cmd_generate(
    input: &Path,
    config: &Config,
    filter: Option<&str>,
    dry_run: bool,
) -> Result<(), CliError> {
    let Some(output) = synthesize(input, config, filter)? else {
        return Ok(());
    };

    let writer = FileWriter::new(dry_run);
    for result in writer.write_all(&config.output.dir, &output.files)? {
        match result {
            WriteResult::Written { path, bytes } => {
                println!(
                    "{} Written {} bytes to {}",
                    "✓".green(),
                    bytes,
                    path.display()
                );
            }
            WriteResult::DryRun { content, path } => {
                println!(
                    "{} Would write to {}:",
                    "[dry-run]".yellow(),
                    path.display()
                );
                println!("{}", "─".repeat(60).dimmed());
                println!("{}", content);
                println!("{}", "─".repeat(60).dimmed());
            }
        }
    }

    Ok(())
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> Result<(), CliError> {
    if output.exists() && !force {
        println!("  Use --force to overwrite");
        return Err(CliError::Validation(format!(
            "Configuration file already exists: {}",
            output.display()
        )));
    }

    std::fs::write(&output, ConfigManager::default_config_content())?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Check command implementation.
fn cmd_check(input: &Path, config: &Config, filter: Option<&str>) -> Result<(), CliError> {
    let Some(output) = synthesize(input, config, filter)? else {
        return Ok(());
    };

    println!("{}", "Checking generated files...".cyan());

    let stale = find_stale(&config.output.dir, &output.files)?;
    if stale.is_empty() {
        println!("{} Generated files are up-to-date", "✓".green());
        return Ok(());
    }

    for entry in &stale {
        let reason = match entry {
            Staleness::Missing(_) => "missing",
            Staleness::Changed(_) => "changed",
        };
        println!("  {} {} ({})", "✗".red(), entry.path().display(), reason);
    }
    println!("  Run 'aspectgen generate' to update");

    Err(CliError::Validation(format!(
        "{} generated file(s) out of date",
        stale.len()
    )))
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
