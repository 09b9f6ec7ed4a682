//! Provenance record: the canonical JSON-LD document for an asset
//!
//! The record has a fixed shape. Serializing it with `serde_json` produces the
//! document consumed by the validator, the signing tool and the web layer.

use crate::vocab;
use serde::{Deserialize, Serialize};

/// A fixed-shape linked-data document describing an asset's origin, rights
/// and attribution.
///
/// Nested entities are inlined, so the document is always a single rooted
/// graph. `license` is the only optional property: when no license URL is
/// known the property is left out and the conformance check reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceRecord {
    /// Prefix table and term definitions
    #[serde(rename = "@context")]
    pub context: ProvenanceContext,

    /// Declared classes (`edm:ProvidedCHO`, `schema:CreativeWork`)
    #[serde(rename = "type")]
    pub types: Vec<String>,

    /// Asset identifier
    pub id: String,

    /// `dc:title`
    #[serde(rename = "dc:title")]
    pub title: String,

    /// `dc:creator`
    #[serde(rename = "dc:creator")]
    pub creator: String,

    /// `dc:date`
    #[serde(rename = "dc:date")]
    pub date: String,

    /// `dc:rights`
    #[serde(rename = "dc:rights")]
    pub rights: String,

    /// `dc:format`
    #[serde(rename = "dc:format")]
    pub format: String,

    /// `schema:contentUrl`
    #[serde(rename = "schema:contentUrl")]
    pub content_url: String,

    /// `schema:license`, an IRI reference
    #[serde(
        rename = "schema:license",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub license: Option<IriRef>,

    /// `prov:wasDerivedFrom`
    #[serde(rename = "prov:wasDerivedFrom")]
    pub derived_from: DerivedFrom,

    /// `prov:wasAttributedTo`
    #[serde(rename = "prov:wasAttributedTo")]
    pub attributed_to: AttributedTo,

    /// `prov:generatedAtTime`, typed as `xsd:dateTime`
    #[serde(rename = "prov:generatedAtTime")]
    pub generated_at: TypedLiteral,
}

/// The `@context` block of a provenance record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceContext {
    /// `dc` prefix
    pub dc: String,
    /// `edm` prefix
    pub edm: String,
    /// `schema` prefix
    pub schema: String,
    /// `prov` prefix
    pub prov: String,
    /// `xsd` prefix
    pub xsd: String,
    /// Term definition making `schema:license` an IRI-valued property
    #[serde(rename = "schema:license")]
    pub license: TermDefinition,
    /// Alias of `@id`
    pub id: String,
    /// Alias of `@type`
    #[serde(rename = "type")]
    pub type_alias: String,
}

impl ProvenanceContext {
    /// Build the standard context.
    ///
    /// Returns a fresh value on every call.
    pub fn standard() -> Self {
        Self {
            dc: vocab::DC.to_string(),
            edm: vocab::EDM.to_string(),
            schema: vocab::SCHEMA.to_string(),
            prov: vocab::PROV.to_string(),
            xsd: vocab::XSD.to_string(),
            license: TermDefinition {
                id: format!("{}license", vocab::SCHEMA),
                type_coercion: "@id".to_string(),
            },
            id: "@id".to_string(),
            type_alias: "@type".to_string(),
        }
    }
}

/// An expanded JSON-LD term definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermDefinition {
    /// Full IRI of the term
    #[serde(rename = "@id")]
    pub id: String,
    /// Value coercion (`@id` for IRI-valued terms)
    #[serde(rename = "@type")]
    pub type_coercion: String,
}

/// A reference to another resource by IRI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IriRef {
    /// Referenced IRI
    #[serde(rename = "@id")]
    pub id: String,
}

/// The upstream binary the record was derived from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedFrom {
    /// Content URL of the binary
    pub id: String,
    /// Always `prov:Entity`
    #[serde(rename = "type")]
    pub entity_type: String,
    /// `dc:description`
    #[serde(rename = "dc:description")]
    pub description: String,
}

/// The agent responsible for the record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributedTo {
    /// Agent IRI
    pub id: String,
    /// Always `prov:Agent`
    #[serde(rename = "type")]
    pub agent_type: String,
    /// `schema:name`
    #[serde(rename = "schema:name")]
    pub name: String,
}

/// A literal with an explicit datatype
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedLiteral {
    /// Lexical value
    #[serde(rename = "@value")]
    pub value: String,
    /// Datatype as a compact IRI
    #[serde(rename = "@type")]
    pub datatype: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_standard_context_serialization() {
        let value = serde_json::to_value(ProvenanceContext::standard()).unwrap();
        assert_eq!(value["dc"], "http://purl.org/dc/terms/");
        assert_eq!(value["xsd"], "http://www.w3.org/2001/XMLSchema#");
        assert_eq!(
            value["schema:license"],
            json!({"@id": "http://schema.org/license", "@type": "@id"})
        );
        assert_eq!(value["id"], "@id");
        assert_eq!(value["type"], "@type");
    }

    #[test]
    fn test_typed_literal_keys() {
        let literal = TypedLiteral {
            value: "2024-01-01T00:00:00Z".to_string(),
            datatype: "xsd:dateTime".to_string(),
        };
        assert_eq!(
            serde_json::to_value(literal).unwrap(),
            json!({"@value": "2024-01-01T00:00:00Z", "@type": "xsd:dateTime"})
        );
    }
}
