//! Validation results and diagnostics

use serde::Serialize;
use std::fmt;

/// Outcome of a conformance check.
///
/// `conforms == false` is a hard stop: callers must not sign or publish the
/// record. The result is never cached; every call produces a fresh value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Whether the record satisfies every shape
    pub conforms: bool,

    /// Violations in evaluation order
    pub diagnostics: Vec<Violation>,
}

impl ValidationResult {
    /// A non-conforming result carrying one diagnostic
    pub fn failed(violation: Violation) -> Self {
        Self {
            conforms: false,
            diagnostics: vec![violation],
        }
    }

    /// Whether any diagnostic mentions the given property path
    pub fn mentions_path(&self, path: &str) -> bool {
        self.diagnostics.iter().any(|v| v.path.as_deref() == Some(path))
    }
}

/// One constraint violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Name of the node shape that was violated
    pub shape: String,

    /// The node that failed, in N-Triples form
    pub focus_node: String,

    /// Property path as written in the schema
    pub path: Option<String>,

    /// The constraint that failed
    pub constraint: ConstraintKind,

    /// Offending value, if the violation concerns a single value
    pub value: Option<String>,

    /// Human-readable description
    pub message: String,
}

impl Violation {
    /// A violation raised when the check itself could not run
    pub fn engine(message: impl Into<String>) -> Self {
        Self {
            shape: "-".to_string(),
            focus_node: "-".to_string(),
            path: None,
            constraint: ConstraintKind::Engine,
            value: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.constraint, self.shape)?;
        if let Some(path) = &self.path {
            write!(f, " {} {}", self.focus_node, path)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Constraint components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Too few values
    MinCount,
    /// Too many values
    MaxCount,
    /// Wrong or ill-formed literal datatype
    Datatype,
    /// Wrong kind of value node
    NodeKind,
    /// Value node is not an instance of the required class
    Class,
    /// Lexical form does not match the pattern
    Pattern,
    /// The data or schema could not be evaluated
    Engine,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConstraintKind::MinCount => "MinCount",
            ConstraintKind::MaxCount => "MaxCount",
            ConstraintKind::Datatype => "Datatype",
            ConstraintKind::NodeKind => "NodeKind",
            ConstraintKind::Class => "Class",
            ConstraintKind::Pattern => "Pattern",
            ConstraintKind::Engine => "Engine",
        };
        f.write_str(name)
    }
}
