//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use echolot_catalog::CatalogSettings;
use echolot_gatekeeper::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// File locations
    #[serde(default)]
    pub paths: Paths,

    /// Commons client settings
    #[serde(default)]
    pub catalog: CatalogSettings,

    /// External signing tool
    #[serde(default)]
    pub signer: SignerSettings,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Conformance check options
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Where the pipeline reads and writes its files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    /// Source metadata (YAML)
    pub source: PathBuf,

    /// Provenance record (JSON-LD)
    pub record: PathBuf,

    /// Shape schema; the bundled schema is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shapes: Option<PathBuf>,

    /// Downloaded asset binary
    pub asset: PathBuf,

    /// Signed asset written by the signing tool
    pub signed_asset: PathBuf,
}

/// External signing tool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerSettings {
    /// Program name or path
    pub program: String,

    /// Manifest handed to the tool
    pub manifest: PathBuf,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".echolot").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `~/.echolot/config.toml` is
    /// read if present and defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(CliError::Config(format!(
                    "Config file '{}' does not exist",
                    path.display()
                )))
            }
            Some(path) => path.to_path_buf(),
            None => Self::path()?,
        };

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            Self::from_toml(&contents)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        if config.signer.program.trim().is_empty() {
            return Err(CliError::Config("signer.program must not be empty".into()));
        }
        Ok(config)
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            source: PathBuf::from("metadata/source.yml"),
            record: PathBuf::from("metadata/record.jsonld"),
            shapes: None,
            asset: PathBuf::from("data/image.jpg"),
            signed_asset: PathBuf::from("data/image.c2pa.jpg"),
        }
    }
}

impl Default for SignerSettings {
    fn default() -> Self {
        Self {
            program: "c2patool".to_string(),
            manifest: PathBuf::from("metadata/claim.json"),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.paths.source, PathBuf::from("metadata/source.yml"));
        assert_eq!(config.paths.record, PathBuf::from("metadata/record.jsonld"));
        assert_eq!(config.signer.program, "c2patool");
        assert_eq!(config.catalog.timeout_secs, 20);
        assert!(config.validation.class_inference);
        assert!(config.settings.color);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [paths]
            record = "out/record.jsonld"

            [catalog]
            user_agent = "my-archive/1.0 (archivist@example.org)"

            [settings]
            format = "json"

            [validation]
            class_inference = false
            "#,
        )
        .unwrap();

        assert_eq!(config.paths.record, PathBuf::from("out/record.jsonld"));
        assert_eq!(config.paths.source, PathBuf::from("metadata/source.yml"));
        assert_eq!(config.catalog.user_agent, "my-archive/1.0 (archivist@example.org)");
        assert_eq!(config.catalog.max_retries, 3);
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
        assert!(!config.validation.class_inference);
        assert!(config.validation.check_lexical_forms);
    }

    #[test]
    fn test_empty_signer_rejected() {
        let result = Config::from_toml("[signer]\nprogram = \"\"\n");
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_missing_explicit_config() {
        let result = Config::load(Some(Path::new("/nonexistent/echolot.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_load_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[signer]\nprogram = \"/opt/bin/c2patool\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.signer.program, "/opt/bin/c2patool");
    }
}
