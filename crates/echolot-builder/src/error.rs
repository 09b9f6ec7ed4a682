//! Record builder error types

use echolot_domain::SourceField;
use thiserror::Error;

/// Errors that can occur while constructing a provenance record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A mandatory source field is absent after normalization
    #[error("Missing required field '{field}' in source record")]
    MissingRequiredField {
        /// The absent field
        field: SourceField,
    },
}
