//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Echolot CLI - Build, validate and sign provenance records for digital assets.
#[derive(Debug, Parser)]
#[command(name = "echolot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "ECHOLOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (paths and verdicts only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the JSON-LD record from the source file
    Build(BuildArgs),

    /// Validate a JSON-LD record against the shape schema
    Validate(ValidateArgs),

    /// Fetch a file from Wikimedia Commons, then build and validate its record
    BuildFromCommons(CommonsArgs),

    /// Sign the asset with the external signing tool
    Sign(SignArgs),

    /// Show the signed asset's manifest
    Info(InfoArgs),
}

/// Arguments for the build command.
#[derive(Debug, Parser)]
pub struct BuildArgs {
    /// Source YAML file
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Output JSON-LD record
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// JSON-LD record to validate
    #[arg(short, long)]
    pub record: Option<PathBuf>,

    /// Shape schema (JSON); the bundled schema is used when omitted
    #[arg(long)]
    pub shapes: Option<PathBuf>,

    /// Disable class-hierarchy inference
    #[arg(long)]
    pub no_inference: bool,
}

/// Arguments for the build-from-commons command.
#[derive(Debug, Parser)]
pub struct CommonsArgs {
    /// Commons title, e.g. "File:Leibniz_University_Hannover.jpg"
    #[arg(short, long)]
    pub title: String,

    /// Do not download the asset binary
    #[arg(long)]
    pub skip_download: bool,
}

/// Arguments for the sign command.
#[derive(Debug, Parser)]
pub struct SignArgs {
    /// Asset to sign
    #[arg(short, long)]
    pub asset: Option<PathBuf>,

    /// Record that must conform before signing
    #[arg(short, long)]
    pub record: Option<PathBuf>,

    /// Signed output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the info command.
#[derive(Debug, Parser)]
pub struct InfoArgs {
    /// Signed asset to inspect
    #[arg(short, long)]
    pub asset: Option<PathBuf>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
