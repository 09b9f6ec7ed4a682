//! Namespace prefixes and compact terms used in provenance records

/// Dublin Core terms
pub const DC: &str = "http://purl.org/dc/terms/";
/// Europeana Data Model
pub const EDM: &str = "http://www.europeana.eu/schemas/edm/";
/// schema.org
pub const SCHEMA: &str = "http://schema.org/";
/// W3C PROV ontology
pub const PROV: &str = "http://www.w3.org/ns/prov#";
/// XML Schema datatypes
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
/// RDF syntax namespace
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// `rdf:type`
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// Prefix table in declaration order
pub const PREFIXES: [(&str, &str); 5] = [
    ("dc", DC),
    ("edm", EDM),
    ("schema", SCHEMA),
    ("prov", PROV),
    ("xsd", XSD),
];

/// Classes every provenance record is declared as
pub const RECORD_TYPES: [&str; 2] = ["edm:ProvidedCHO", "schema:CreativeWork"];

/// Class of the upstream source entity
pub const PROV_ENTITY: &str = "prov:Entity";
/// Class of the attributed agent
pub const PROV_AGENT: &str = "prov:Agent";
/// Datatype of the generation timestamp
pub const XSD_DATE_TIME: &str = "xsd:dateTime";

/// Description attached to the derived-from entity
pub const DERIVED_FROM_DESCRIPTION: &str = "Downloaded binary from the source catalog";
