//! Echolot Storage Layer
//!
//! Reads and writes the per-asset metadata files: the YAML source file, the
//! JSON-LD provenance record and downloaded asset binaries.
//!
//! # Architecture
//!
//! - YAML (`serde_yaml`) for hand-edited source files
//! - Pretty-printed JSON for records, so diffs stay readable
//! - Every write goes to a temporary file in the target directory and is
//!   renamed into place, so readers never observe a partial file
//!
//! # Examples
//!
//! ```no_run
//! use echolot_store::{read_source, write_source};
//!
//! let source = read_source("metadata/source.yml").unwrap();
//! write_source("metadata/source.copy.yml", &source).unwrap();
//! ```

#![warn(missing_docs)]

mod files;

pub use files::{read_document, read_source, write_bytes, write_record, write_source};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The file does not exist
    #[error("File not found: {}", path.display())]
    NotFound {
        /// Missing path
        path: PathBuf,
    },

    /// Filesystem error
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file exists but could not be parsed
    #[error("Invalid data in {}: {message}", path.display())]
    InvalidData {
        /// Path being read
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A value could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}
