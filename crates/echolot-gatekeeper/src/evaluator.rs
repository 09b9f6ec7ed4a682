//! Shape evaluation
//!
//! [`ShapeEvaluator`] is the seam between the gatekeeper and whatever engine
//! checks a data graph against a shape schema. [`NativeShapeEvaluator`] is the
//! built-in engine; tests and alternative backends provide their own.

use crate::config::ValidationConfig;
use crate::error::GatekeeperError;
use crate::graph::{DataGraph, Term};
use crate::report::{ConstraintKind, Violation};
use crate::shapes::{NodeKind, NodeShape, PropertyShape, ShapeConstraintSet};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use echolot_domain::vocab;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Raw output of a shape engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationReport {
    /// Whether the data graph conforms
    pub conforms: bool,
    /// Violations in the engine's order
    pub violations: Vec<Violation>,
}

/// A backend that evaluates a data graph against a shape schema
pub trait ShapeEvaluator {
    /// Error type for evaluation failures
    type Error: fmt::Display;

    /// Evaluate `data` against `shapes`.
    ///
    /// Must be deterministic: the same inputs yield the same report, with
    /// violations in the same order.
    fn evaluate(
        &self,
        data: &DataGraph,
        shapes: &ShapeConstraintSet,
    ) -> Result<EvaluationReport, Self::Error>;
}

/// Built-in shape engine.
///
/// Supports `min_count`, `max_count`, `datatype`, `node_kind`, `class` and
/// `pattern`. Violations are ordered by shape, then focus node (lexical
/// order), then property, then value.
#[derive(Debug, Clone, Default)]
pub struct NativeShapeEvaluator {
    config: ValidationConfig,
}

impl NativeShapeEvaluator {
    /// Create an evaluator with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }
}

impl ShapeEvaluator for NativeShapeEvaluator {
    type Error = GatekeeperError;

    fn evaluate(
        &self,
        data: &DataGraph,
        shapes: &ShapeConstraintSet,
    ) -> Result<EvaluationReport, Self::Error> {
        let evaluation = Evaluation {
            data,
            shapes,
            config: self.config,
            superclasses: if self.config.class_inference {
                superclasses(shapes)
            } else {
                BTreeMap::new()
            },
        };

        // Compile every pattern up front so a bad schema fails regardless of the data.
        let patterns = shapes
            .shapes
            .iter()
            .map(|shape| {
                shape
                    .properties
                    .iter()
                    .map(|p| p.pattern.as_deref().map(Regex::new).transpose())
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| GatekeeperError::Shapes(format!("Invalid pattern: {}", e)))?;

        let mut violations = Vec::new();
        for (shape, patterns) in shapes.shapes.iter().zip(&patterns) {
            let target = shapes.expand(&shape.target_class);
            let focus_nodes: Vec<&Term> = data
                .typed_nodes()
                .into_iter()
                .filter(|node| evaluation.is_instance(node, &target))
                .collect();

            for focus in focus_nodes {
                for (property, pattern) in shape.properties.iter().zip(patterns) {
                    evaluation.check_property(shape, focus, property, pattern.as_ref(), &mut violations);
                }
            }
        }

        Ok(EvaluationReport {
            conforms: violations.is_empty(),
            violations,
        })
    }
}

struct Evaluation<'a> {
    data: &'a DataGraph,
    shapes: &'a ShapeConstraintSet,
    config: ValidationConfig,
    // Expanded class IRI -> all transitive superclasses
    superclasses: BTreeMap<String, BTreeSet<String>>,
}

impl Evaluation<'_> {
    fn is_instance(&self, node: &Term, class: &str) -> bool {
        self.data.types_of(node).any(|declared| {
            declared == class
                || self
                    .superclasses
                    .get(declared)
                    .is_some_and(|supers| supers.contains(class))
        })
    }

    fn check_property(
        &self,
        shape: &NodeShape,
        focus: &Term,
        property: &PropertyShape,
        pattern: Option<&Regex>,
        out: &mut Vec<Violation>,
    ) {
        let path = self.shapes.expand(&property.path);
        let values: Vec<&Term> = self.data.objects(focus, &path).collect();
        let report = |kind: ConstraintKind, value: Option<&Term>, message: String| Violation {
            shape: shape.name.clone(),
            focus_node: focus.to_string(),
            path: Some(property.path.clone()),
            constraint: kind,
            value: value.map(Term::to_string),
            message: property.message.clone().unwrap_or(message),
        };

        if let Some(min) = property.min_count {
            if values.len() < min {
                out.push(report(
                    ConstraintKind::MinCount,
                    None,
                    format!("Less than {} values on {}", min, property.path),
                ));
            }
        }
        if let Some(max) = property.max_count {
            if values.len() > max {
                out.push(report(
                    ConstraintKind::MaxCount,
                    None,
                    format!("More than {} values on {}", max, property.path),
                ));
            }
        }

        for value in values {
            if let Some(datatype) = &property.datatype {
                if let Some(message) = self.datatype_mismatch(value, datatype) {
                    out.push(report(ConstraintKind::Datatype, Some(value), message));
                }
            }
            if let Some(kind) = property.node_kind {
                if !node_kind_matches(value, kind) {
                    out.push(report(
                        ConstraintKind::NodeKind,
                        Some(value),
                        format!("Value {} is not of node kind {}", value, node_kind_name(kind)),
                    ));
                }
            }
            if let Some(class) = &property.class {
                if !self.is_instance(value, &self.shapes.expand(class)) {
                    out.push(report(
                        ConstraintKind::Class,
                        Some(value),
                        format!("Value {} is not an instance of {}", value, class),
                    ));
                }
            }
            if let Some(pattern) = pattern {
                if !value.lexical().is_some_and(|lexical| pattern.is_match(lexical)) {
                    out.push(report(
                        ConstraintKind::Pattern,
                        Some(value),
                        format!("Value {} does not match pattern {}", value, pattern.as_str()),
                    ));
                }
            }
        }
    }

    fn datatype_mismatch(&self, value: &Term, datatype: &str) -> Option<String> {
        let expected = self.shapes.expand(datatype);
        match value {
            Term::Literal { value: lexical, datatype: actual } if *actual == expected => {
                if self.config.check_lexical_forms && !lexically_valid(lexical, &expected) {
                    Some(format!("Value {} is not a valid {}", value, datatype))
                } else {
                    None
                }
            }
            _ => Some(format!("Value {} does not have datatype {}", value, datatype)),
        }
    }
}

/// Transitive closure of the schema's class hierarchy, in expanded IRIs
fn superclasses(shapes: &ShapeConstraintSet) -> BTreeMap<String, BTreeSet<String>> {
    let direct: BTreeMap<String, Vec<String>> = shapes
        .subclass_of
        .iter()
        .map(|(class, supers)| {
            (
                shapes.expand(class),
                supers.iter().map(|s| shapes.expand(s)).collect(),
            )
        })
        .collect();

    direct
        .keys()
        .map(|class| {
            let mut seen = BTreeSet::new();
            let mut pending: Vec<&String> = direct[class].iter().collect();
            while let Some(next) = pending.pop() {
                if seen.insert(next.clone()) {
                    if let Some(more) = direct.get(next) {
                        pending.extend(more);
                    }
                }
            }
            (class.clone(), seen)
        })
        .collect()
}

fn node_kind_matches(value: &Term, kind: NodeKind) -> bool {
    match kind {
        NodeKind::Iri => matches!(value, Term::Iri(_)),
        NodeKind::Literal => matches!(value, Term::Literal { .. }),
        NodeKind::BlankNode => matches!(value, Term::Blank(_)),
        NodeKind::BlankNodeOrIri => value.is_node(),
    }
}

fn node_kind_name(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Iri => "IRI",
        NodeKind::Literal => "Literal",
        NodeKind::BlankNode => "BlankNode",
        NodeKind::BlankNodeOrIri => "BlankNodeOrIRI",
    }
}

/// Lexical-space check for the XSD datatypes records use; others always pass
fn lexically_valid(lexical: &str, datatype: &str) -> bool {
    let Some(local) = datatype.strip_prefix(vocab::XSD) else {
        return true;
    };
    match local {
        "dateTime" => {
            DateTime::parse_from_rfc3339(lexical).is_ok()
                || NaiveDateTime::parse_from_str(lexical, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        }
        "date" => NaiveDate::parse_from_str(lexical, "%Y-%m-%d").is_ok(),
        "integer" => lexical.parse::<i128>().is_ok(),
        "decimal" | "double" | "float" => lexical.parse::<f64>().is_ok(),
        "boolean" => matches!(lexical, "true" | "false" | "1" | "0"),
        "anyURI" => !lexical.chars().any(char::is_whitespace),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(properties: serde_json::Value) -> ShapeConstraintSet {
        let json = json!({
            "version": "test",
            "prefixes": {
                "ex": "https://example.org/ns#",
                "xsd": "http://www.w3.org/2001/XMLSchema#"
            },
            "subclass_of": {
                "ex:Photo": ["ex:Work"],
                "ex:Work": ["ex:Thing"]
            },
            "shapes": [{"name": "WorkShape", "target_class": "ex:Work", "properties": properties}]
        });
        ShapeConstraintSet::from_json(&json.to_string()).unwrap()
    }

    fn graph(node: serde_json::Value) -> DataGraph {
        let mut document = json!({
            "@context": {
                "ex": "https://example.org/ns#",
                "xsd": "http://www.w3.org/2001/XMLSchema#",
                "ex:link": {"@type": "@id"}
            },
            "@id": "https://example.org/item"
        });
        for (key, value) in node.as_object().unwrap() {
            document[key] = value.clone();
        }
        DataGraph::from_json_ld(&document).unwrap()
    }

    fn evaluate(config: ValidationConfig, shapes: &ShapeConstraintSet, data: &DataGraph) -> EvaluationReport {
        NativeShapeEvaluator::new(config).evaluate(data, shapes).unwrap()
    }

    #[test]
    fn test_conforming_node() {
        let shapes = schema(json!([{"path": "ex:title", "min_count": 1, "datatype": "xsd:string"}]));
        let data = graph(json!({"@type": "ex:Work", "ex:title": "Demo"}));
        let report = evaluate(ValidationConfig::default(), &shapes, &data);
        assert!(report.conforms);
        assert!(report.violations.is_empty());
    }

    #[test]
    fn test_min_and_max_count() {
        let shapes = schema(json!([
            {"path": "ex:title", "min_count": 1},
            {"path": "ex:tag", "max_count": 1}
        ]));
        let data = graph(json!({"@type": "ex:Work", "ex:tag": ["a", "b"]}));
        let report = evaluate(ValidationConfig::default(), &shapes, &data);

        assert!(!report.conforms);
        let kinds: Vec<_> = report.violations.iter().map(|v| v.constraint).collect();
        assert_eq!(kinds, vec![ConstraintKind::MinCount, ConstraintKind::MaxCount]);
        assert_eq!(report.violations[0].path.as_deref(), Some("ex:title"));
        assert_eq!(report.violations[0].focus_node, "<https://example.org/item>");
    }

    #[test]
    fn test_datatype_and_lexical_form() {
        let shapes = schema(json!([{"path": "ex:when", "datatype": "xsd:dateTime"}]));
        let bad_lexical = graph(json!({
            "@type": "ex:Work",
            "ex:when": {"@value": "circa 1920", "@type": "xsd:dateTime"}
        }));
        let report = evaluate(ValidationConfig::default(), &shapes, &bad_lexical);
        assert_eq!(report.violations.len(), 1);
        assert!(report.violations[0].message.contains("is not a valid xsd:dateTime"));

        let report = evaluate(ValidationConfig::permissive(), &shapes, &bad_lexical);
        assert!(report.conforms);

        let plain_string = graph(json!({"@type": "ex:Work", "ex:when": "2024-01-01T00:00:00Z"}));
        let report = evaluate(ValidationConfig::default(), &shapes, &plain_string);
        assert!(report.violations[0].message.contains("does not have datatype"));
    }

    #[test]
    fn test_node_kind() {
        let shapes = schema(json!([{"path": "ex:link", "node_kind": "iri"}]));
        let ok = graph(json!({"@type": "ex:Work", "ex:link": "https://example.org/other"}));
        assert!(evaluate(ValidationConfig::default(), &shapes, &ok).conforms);

        let literal = graph(json!({"@type": "ex:Work", "ex:other": "x", "ex:link": {"@value": "x"}}));
        let report = evaluate(ValidationConfig::default(), &shapes, &literal);
        assert_eq!(report.violations[0].constraint, ConstraintKind::NodeKind);
    }

    #[test]
    fn test_target_class_inference() {
        let shapes = schema(json!([{"path": "ex:title", "min_count": 1}]));
        let photo = graph(json!({"@type": "ex:Photo"}));

        let report = evaluate(ValidationConfig::default(), &shapes, &photo);
        assert!(!report.conforms, "subclass instance should be a focus node");

        let report = evaluate(ValidationConfig::without_inference(), &shapes, &photo);
        assert!(report.conforms, "without inference the photo is not targeted");
    }

    #[test]
    fn test_class_constraint_uses_transitive_hierarchy() {
        let shapes = schema(json!([{"path": "ex:part", "class": "ex:Thing"}]));
        let data = graph(json!({
            "@type": "ex:Work",
            "ex:part": {"@id": "https://example.org/part", "@type": "ex:Photo"}
        }));
        assert!(evaluate(ValidationConfig::default(), &shapes, &data).conforms);

        let report = evaluate(ValidationConfig::without_inference(), &shapes, &data);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].constraint, ConstraintKind::Class);
    }

    #[test]
    fn test_pattern() {
        let shapes = schema(json!([{"path": "ex:format", "pattern": "^image/"}]));
        let data = graph(json!({"@type": "ex:Work", "ex:format": "text/html"}));
        let report = evaluate(ValidationConfig::default(), &shapes, &data);
        assert_eq!(report.violations[0].constraint, ConstraintKind::Pattern);
        assert_eq!(
            report.violations[0].value.as_deref(),
            Some("\"text/html\"^^<http://www.w3.org/2001/XMLSchema#string>")
        );
    }

    #[test]
    fn test_custom_message() {
        let shapes = schema(json!([{"path": "ex:title", "min_count": 1, "message": "A title is required"}]));
        let data = graph(json!({"@type": "ex:Work"}));
        let report = evaluate(ValidationConfig::default(), &shapes, &data);
        assert_eq!(report.violations[0].message, "A title is required");
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let shapes = schema(json!([{"path": "ex:title", "pattern": "("}]));
        let data = graph(json!({"@type": "ex:Thing"}));
        let result = NativeShapeEvaluator::default().evaluate(&data, &shapes);
        assert!(matches!(result, Err(GatekeeperError::Shapes(_))));
    }

    #[test]
    fn test_cyclic_hierarchy_terminates() {
        let json = json!({
            "version": "test",
            "subclass_of": {"urn:A": ["urn:B"], "urn:B": ["urn:A"]},
            "shapes": [{"name": "S", "target_class": "urn:B", "properties": [{"path": "urn:p", "min_count": 1}]}]
        });
        let shapes = ShapeConstraintSet::from_json(&json.to_string()).unwrap();
        let data = DataGraph::from_json_ld(&json!({"@id": "urn:x", "@type": "urn:A"})).unwrap();
        let report = evaluate(ValidationConfig::default(), &shapes, &data);
        assert_eq!(report.violations.len(), 1);
    }

    #[test]
    fn test_lexical_forms() {
        let xsd = |local: &str| format!("{}{}", vocab::XSD, local);
        assert!(lexically_valid("2024-01-01T00:00:00Z", &xsd("dateTime")));
        assert!(lexically_valid("2024-01-01T00:00:00", &xsd("dateTime")));
        assert!(lexically_valid("2024-01-01T00:00:00.250+02:00", &xsd("dateTime")));
        assert!(!lexically_valid("2024-01-01 00:00:00", &xsd("dateTime")));
        assert!(lexically_valid("2024-02-29", &xsd("date")));
        assert!(!lexically_valid("2023-02-29", &xsd("date")));
        assert!(!lexically_valid("yes", &xsd("boolean")));
        assert!(lexically_valid("anything", "https://example.org/custom"));
    }
}
