//! Gatekeeper error types

use thiserror::Error;

/// Errors that can occur during gatekeeper operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatekeeperError {
    /// The data document could not be read as a JSON-LD graph
    #[error("Graph error: {0}")]
    Graph(String),

    /// The shape constraint set is malformed
    #[error("Shape schema error: {0}")]
    Shapes(String),

    /// The shape evaluator failed
    #[error("Evaluator error: {0}")]
    Evaluator(String),
}
