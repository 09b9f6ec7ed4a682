//! Echolot CLI library.
//!
//! Configuration, command execution and output formatting for the `echolot`
//! binary. The pipeline stages themselves live in the library crates; this
//! crate wires them to files, the Commons catalog and the signing tool.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod external;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use external::{ExternalTool, ToolOutput};
pub use output::Formatter;
