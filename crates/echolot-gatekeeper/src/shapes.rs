//! Declarative shape constraint schema
//!
//! A [`ShapeConstraintSet`] is read-only input to validation and is versioned
//! independently of this crate. It is loaded from JSON:
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "prefixes": { "dc": "http://purl.org/dc/terms/" },
//!   "subclass_of": { "prov:Person": ["prov:Agent"] },
//!   "shapes": [
//!     {
//!       "name": "AgentShape",
//!       "target_class": "prov:Agent",
//!       "properties": [ { "path": "schema:name", "min_count": 1 } ]
//!     }
//!   ]
//! }
//! ```

use crate::error::GatekeeperError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Schema shipped with the crate for provenance records
pub const BUNDLED_SHAPES: &str = include_str!("../shapes/provenance.shapes.json");

/// A versioned set of node shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeConstraintSet {
    /// Schema version
    pub version: String,

    /// Prefixes used by compact IRIs in this schema
    #[serde(default)]
    pub prefixes: BTreeMap<String, String>,

    /// Class hierarchy consulted when class inference is enabled
    #[serde(default)]
    pub subclass_of: BTreeMap<String, Vec<String>>,

    /// Node shapes, evaluated in order
    pub shapes: Vec<NodeShape>,
}

/// Constraints on every instance of a target class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeShape {
    /// Shape name, reported in diagnostics
    pub name: String,

    /// Class whose instances are the focus nodes
    pub target_class: String,

    /// Property constraints, evaluated in order
    #[serde(default)]
    pub properties: Vec<PropertyShape>,
}

/// Constraints on the values of one property
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyShape {
    /// Property IRI (compact or absolute)
    pub path: String,

    /// Minimum number of values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_count: Option<usize>,

    /// Maximum number of values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_count: Option<usize>,

    /// Required literal datatype
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,

    /// Required kind of value node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_kind: Option<NodeKind>,

    /// Required class of value nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    /// Regular expression the lexical form must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Custom message used instead of the generated one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Kinds of value node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Named node
    Iri,
    /// Literal value
    Literal,
    /// Anonymous node
    BlankNode,
    /// Named or anonymous node
    BlankNodeOrIri,
}

impl ShapeConstraintSet {
    /// Parse a schema from JSON
    pub fn from_json(json: &str) -> Result<Self, GatekeeperError> {
        let shapes: Self = serde_json::from_str(json)
            .map_err(|e| GatekeeperError::Shapes(format!("Failed to parse shape schema: {}", e)))?;
        shapes.check()?;
        Ok(shapes)
    }

    /// The schema bundled with this crate
    pub fn bundled() -> Result<Self, GatekeeperError> {
        Self::from_json(BUNDLED_SHAPES)
    }

    /// Expand a compact IRI using this schema's prefixes
    pub fn expand(&self, value: &str) -> String {
        if let Some((prefix, suffix)) = value.split_once(':') {
            if !suffix.starts_with("//") {
                if let Some(namespace) = self.prefixes.get(prefix) {
                    return format!("{namespace}{suffix}");
                }
            }
        }
        value.to_string()
    }

    /// Structural checks that serde cannot express
    fn check(&self) -> Result<(), GatekeeperError> {
        if self.shapes.is_empty() {
            return Err(GatekeeperError::Shapes("schema declares no shapes".to_string()));
        }
        for shape in &self.shapes {
            for property in &shape.properties {
                if let (Some(min), Some(max)) = (property.min_count, property.max_count) {
                    if min > max {
                        return Err(GatekeeperError::Shapes(format!(
                            "{}: min_count {} exceeds max_count {} on {}",
                            shape.name, min, max, property.path
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_schema_parses() {
        let shapes = ShapeConstraintSet::bundled().unwrap();
        assert!(!shapes.version.is_empty());
        assert!(shapes.shapes.iter().any(|s| s.target_class == "edm:ProvidedCHO"));
    }

    #[test]
    fn test_bundled_schema_requires_license() {
        let shapes = ShapeConstraintSet::bundled().unwrap();
        let license = shapes
            .shapes
            .iter()
            .flat_map(|s| &s.properties)
            .find(|p| p.path == "schema:license")
            .unwrap();
        assert_eq!(license.min_count, Some(1));
        assert_eq!(license.node_kind, Some(NodeKind::Iri));
    }

    #[test]
    fn test_expand_compact_iri() {
        let shapes = ShapeConstraintSet::bundled().unwrap();
        assert_eq!(shapes.expand("dc:title"), "http://purl.org/dc/terms/title");
        assert_eq!(shapes.expand("https://example.org/x"), "https://example.org/x");
        assert_eq!(shapes.expand("unknown:thing"), "unknown:thing");
    }

    #[test]
    fn test_rejects_inverted_cardinality() {
        let json = r#"{
            "version": "0",
            "shapes": [{
                "name": "S",
                "target_class": "urn:C",
                "properties": [{"path": "urn:p", "min_count": 2, "max_count": 1}]
            }]
        }"#;
        assert!(matches!(
            ShapeConstraintSet::from_json(json),
            Err(GatekeeperError::Shapes(_))
        ));
    }

    #[test]
    fn test_rejects_empty_schema() {
        let json = r#"{"version": "0", "shapes": []}"#;
        assert!(ShapeConstraintSet::from_json(json).is_err());
    }

    #[test]
    fn test_rejects_unknown_node_kind() {
        let json = r#"{
            "version": "0",
            "shapes": [{
                "name": "S",
                "target_class": "urn:C",
                "properties": [{"path": "urn:p", "node_kind": "quoted_triple"}]
            }]
        }"#;
        assert!(ShapeConstraintSet::from_json(json).is_err());
    }
}
