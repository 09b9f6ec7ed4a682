//! Error types for the CLI application.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading or writing metadata files failed
    #[error(transparent)]
    Store(#[from] echolot_store::StoreError),

    /// The record could not be constructed
    #[error(transparent)]
    Build(#[from] echolot_builder::BuildError),

    /// The shape schema or document could not be processed
    #[error(transparent)]
    Gatekeeper(#[from] echolot_gatekeeper::GatekeeperError),

    /// Catalog ingestion failed
    #[error(transparent)]
    Catalog(#[from] echolot_catalog::CatalogError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The record failed the conformance check
    #[error("Record does not conform to the shape schema ({violations} violation(s)); first: {first}")]
    NonConformant {
        /// Number of diagnostics reported
        violations: usize,
        /// The first diagnostic, naming its constraint and path
        first: String,
    },

    /// A required file is missing
    #[error("Asset not found: {}", path.display())]
    AssetNotFound {
        /// Missing path
        path: PathBuf,
    },

    /// The external tool could not be started
    #[error("External tool '{program}' is not available: {reason}")]
    UnavailableExternalTool {
        /// Program name or path
        program: String,
        /// Why it could not be started
        reason: String,
    },

    /// The external tool ran and reported failure
    #[error("External tool '{program}' failed ({status}): {stderr}")]
    ExternalToolFailed {
        /// Program name or path
        program: String,
        /// Exit status
        status: String,
        /// Captured standard error
        stderr: String,
    },
}
