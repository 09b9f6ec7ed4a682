//! Conformance gate for provenance records

use crate::config::ValidationConfig;
use crate::evaluator::{NativeShapeEvaluator, ShapeEvaluator};
use crate::graph::DataGraph;
use crate::report::{ValidationResult, Violation};
use crate::shapes::ShapeConstraintSet;
use echolot_domain::ProvenanceRecord;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Validates records against a shape schema before they may be signed.
///
/// Holds no per-record state: every call converts the record afresh and
/// returns a new [`ValidationResult`]. Evaluation failures are reported as
/// non-conforming results rather than errors.
pub struct Gatekeeper<E = NativeShapeEvaluator> {
    evaluator: E,
}

impl Gatekeeper<NativeShapeEvaluator> {
    /// Create a gatekeeper backed by the native evaluator
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            evaluator: NativeShapeEvaluator::new(config),
        }
    }

    /// Native evaluator with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }
}

impl Default for Gatekeeper<NativeShapeEvaluator> {
    fn default() -> Self {
        Self::default_config()
    }
}

impl<E: ShapeEvaluator> Gatekeeper<E> {
    /// Create a gatekeeper backed by a custom evaluator
    pub fn with_evaluator(evaluator: E) -> Self {
        Self { evaluator }
    }

    /// The evaluator in use
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Check a record against the schema
    pub fn validate(&self, record: &ProvenanceRecord, shapes: &ShapeConstraintSet) -> ValidationResult {
        match serde_json::to_value(record) {
            Ok(document) => self.validate_document(&document, shapes),
            Err(e) => {
                warn!("Record {} could not be serialized: {}", record.id, e);
                ValidationResult::failed(Violation::engine(format!(
                    "Failed to serialize record: {}",
                    e
                )))
            }
        }
    }

    /// Check an arbitrary JSON-LD document against the schema
    pub fn validate_document(&self, document: &Value, shapes: &ShapeConstraintSet) -> ValidationResult {
        let data = match DataGraph::from_json_ld(document) {
            Ok(data) => data,
            Err(e) => {
                warn!("Document could not be read as a graph: {}", e);
                return ValidationResult::failed(Violation::engine(e.to_string()));
            }
        };
        debug!("Evaluating {} triples against schema {}", data.len(), shapes.version);

        let report = match self.evaluator.evaluate(&data, shapes) {
            Ok(report) => report,
            Err(e) => {
                warn!("Shape evaluation failed: {}", e);
                return ValidationResult::failed(Violation::engine(format!(
                    "Shape evaluation failed: {}",
                    e
                )));
            }
        };

        // A report claiming conformance alongside violations is treated as failing.
        let conforms = report.conforms && report.violations.is_empty();
        if conforms {
            info!("Document conforms to schema {}", shapes.version);
        } else {
            info!(
                "Document does not conform to schema {} ({} violations)",
                shapes.version,
                report.violations.len()
            );
        }

        ValidationResult {
            conforms,
            diagnostics: report.violations,
        }
    }
}
