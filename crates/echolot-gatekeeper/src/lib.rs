//! Echolot Gatekeeper
//!
//! Checks provenance records against a declarative shape schema before they
//! are signed or published.
//!
//! The Gatekeeper provides:
//! - JSON-LD to triple conversion for records and arbitrary documents
//! - A versioned shape schema format with a bundled default
//! - A native evaluator, replaceable through [`ShapeEvaluator`]
//! - Ordered, deterministic diagnostics
//!
//! # Schema format
//!
//! Shapes are written in a JSON dialect covering the SHACL Core subset the
//! native evaluator supports: `sh:targetClass`, `sh:minCount`, `sh:maxCount`,
//! `sh:datatype`, `sh:nodeKind`, `sh:class` and `sh:pattern`. A SHACL Turtle
//! file cannot be loaded as-is. An engine that reads SHACL directly plugs in
//! through [`ShapeEvaluator`] and [`Gatekeeper::with_evaluator`] without
//! changing callers.
//!
//! # Examples
//!
//! ```
//! use echolot_gatekeeper::{Gatekeeper, ShapeConstraintSet, ValidationConfig};
//! use serde_json::json;
//!
//! let shapes = ShapeConstraintSet::bundled().unwrap();
//! let gatekeeper = Gatekeeper::new(ValidationConfig::default());
//!
//! let document = json!({
//!     "@context": {"schema": "http://schema.org/", "dc": "http://purl.org/dc/terms/"},
//!     "@id": "https://example.org/work",
//!     "@type": "schema:CreativeWork"
//! });
//! let result = gatekeeper.validate_document(&document, &shapes);
//! assert!(!result.conforms);
//! assert!(result.mentions_path("dc:title"));
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod evaluator;
mod graph;
mod report;
mod shapes;
mod validator;

pub use config::ValidationConfig;
pub use error::GatekeeperError;
pub use evaluator::{EvaluationReport, NativeShapeEvaluator, ShapeEvaluator};
pub use graph::{DataGraph, Term, Triple};
pub use report::{ConstraintKind, ValidationResult, Violation};
pub use shapes::{NodeKind, NodeShape, PropertyShape, ShapeConstraintSet, BUNDLED_SHAPES};
pub use validator::Gatekeeper;
