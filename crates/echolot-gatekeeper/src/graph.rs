//! Triple graph built from a JSON-LD document
//!
//! Only the JSON-LD features provenance records use are supported: an inline
//! `@context` of prefixes, keyword aliases and expanded term definitions with
//! `@type: @id` coercion; node objects; value objects; arrays. Remote contexts,
//! `@graph`, `@list` and language maps are rejected rather than guessed at.

use crate::error::GatekeeperError;
use echolot_domain::vocab;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

/// A node or value in the graph
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    /// Named node
    Iri(String),
    /// Anonymous node, labelled in document order
    Blank(String),
    /// Literal value with its expanded datatype IRI
    Literal {
        /// Lexical form
        value: String,
        /// Datatype IRI
        datatype: String,
    },
}

impl Term {
    /// Whether this term can be the subject of a triple
    pub fn is_node(&self) -> bool {
        !matches!(self, Term::Literal { .. })
    }

    /// The lexical form of a literal, or the IRI of a named node
    pub fn lexical(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            Term::Literal { value, .. } => Some(value),
            Term::Blank(_) => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::Blank(label) => write!(f, "_:{label}"),
            Term::Literal { value, datatype } => write!(f, "\"{value}\"^^<{datatype}>"),
        }
    }
}

/// A single statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    /// Subject node
    pub subject: Term,
    /// Expanded predicate IRI
    pub predicate: String,
    /// Object node or literal
    pub object: Term,
}

/// An in-memory set of triples with the document's top-level nodes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataGraph {
    triples: Vec<Triple>,
    roots: Vec<Term>,
}

impl DataGraph {
    /// Flatten a JSON-LD document into triples.
    ///
    /// The document may be a single node object or an array of them.
    pub fn from_json_ld(document: &Value) -> Result<Self, GatekeeperError> {
        let mut builder = GraphBuilder::default();
        match document {
            Value::Object(node) => {
                builder.read_context(node.get("@context"))?;
                let root = builder.node(node)?;
                builder.graph.roots.push(root);
            }
            Value::Array(nodes) => {
                for node in nodes {
                    let node = node.as_object().ok_or_else(|| {
                        GatekeeperError::Graph("top-level array entries must be objects".into())
                    })?;
                    builder.read_context(node.get("@context"))?;
                    let root = builder.node(node)?;
                    builder.graph.roots.push(root);
                }
            }
            _ => {
                return Err(GatekeeperError::Graph(
                    "document must be a JSON object or array".into(),
                ))
            }
        }
        Ok(builder.graph)
    }

    /// All triples in document order
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Top-level nodes of the document
    pub fn roots(&self) -> &[Term] {
        &self.roots
    }

    /// Number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Whether the graph holds no triples
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Values of `predicate` on `subject`, in document order
    pub fn objects<'a>(&'a self, subject: &'a Term, predicate: &'a str) -> impl Iterator<Item = &'a Term> + 'a {
        self.triples
            .iter()
            .filter(move |t| &t.subject == subject && t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// Declared classes of a node
    pub fn types_of<'a>(&'a self, node: &'a Term) -> impl Iterator<Item = &'a str> + 'a {
        self.objects(node, vocab::RDF_TYPE).filter_map(|t| match t {
            Term::Iri(iri) => Some(iri.as_str()),
            _ => None,
        })
    }

    /// Every node that has at least one declared class, in lexical order
    pub fn typed_nodes(&self) -> BTreeSet<&Term> {
        self.triples
            .iter()
            .filter(|t| t.predicate == vocab::RDF_TYPE)
            .map(|t| &t.subject)
            .collect()
    }
}

#[derive(Default)]
struct GraphBuilder {
    graph: DataGraph,
    prefixes: BTreeMap<String, String>,
    // Term -> (IRI, coerce string values to IRIs)
    terms: BTreeMap<String, (String, bool)>,
    aliases: BTreeMap<String, String>,
    next_blank: usize,
}

impl GraphBuilder {
    fn read_context(&mut self, context: Option<&Value>) -> Result<(), GatekeeperError> {
        let context = match context {
            None | Some(Value::Null) => return Ok(()),
            Some(Value::Object(context)) => context,
            Some(other) => {
                return Err(GatekeeperError::Graph(format!(
                    "only inline object contexts are supported, found {other}"
                )))
            }
        };

        for (key, value) in context {
            match value {
                Value::String(target) if target.starts_with('@') => {
                    self.aliases.insert(key.clone(), target.clone());
                }
                Value::String(iri) => {
                    self.prefixes.insert(key.clone(), iri.clone());
                }
                Value::Object(definition) => {
                    let id = match definition.get("@id").and_then(Value::as_str) {
                        Some(id) => id.to_string(),
                        None => key.clone(),
                    };
                    let coerce = definition.get("@type").and_then(Value::as_str) == Some("@id");
                    self.terms.insert(key.clone(), (id, coerce));
                }
                other => {
                    return Err(GatekeeperError::Graph(format!(
                        "unsupported context entry '{key}': {other}"
                    )))
                }
            }
        }
        Ok(())
    }

    fn keyword<'k>(&'k self, key: &'k str) -> &'k str {
        self.aliases.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Expand a compact IRI with the document's prefixes
    fn expand(&self, value: &str) -> String {
        if let Some((iri, _)) = self.terms.get(value) {
            return self.expand_prefix(iri);
        }
        self.expand_prefix(value)
    }

    fn expand_prefix(&self, value: &str) -> String {
        if let Some((prefix, suffix)) = value.split_once(':') {
            if !suffix.starts_with("//") {
                if let Some(namespace) = self.prefixes.get(prefix) {
                    return format!("{namespace}{suffix}");
                }
            }
        }
        value.to_string()
    }

    fn blank(&mut self) -> Term {
        let label = format!("b{}", self.next_blank);
        self.next_blank += 1;
        Term::Blank(label)
    }

    fn node(&mut self, node: &Map<String, Value>) -> Result<Term, GatekeeperError> {
        let subject = match node.iter().find(|(k, _)| self.keyword(k) == "@id") {
            Some((_, Value::String(id))) => Term::Iri(self.expand_prefix(id)),
            Some((_, other)) => {
                return Err(GatekeeperError::Graph(format!("@id must be a string, found {other}")))
            }
            None => self.blank(),
        };

        for (key, value) in node {
            let keyword = self.keyword(key).to_string();
            match keyword.as_str() {
                "@context" | "@id" => {}
                "@type" => {
                    for class in string_values(value, "@type")? {
                        let class = Term::Iri(self.expand(class));
                        self.push(subject.clone(), vocab::RDF_TYPE.to_string(), class);
                    }
                }
                _ if keyword.starts_with('@') => {
                    return Err(GatekeeperError::Graph(format!(
                        "unsupported keyword '{keyword}' on {subject}"
                    )))
                }
                _ => {
                    let predicate = self.expand(key);
                    let coerce = self.terms.get(key.as_str()).is_some_and(|(_, c)| *c);
                    self.property(&subject, &predicate, coerce, value)?;
                }
            }
        }

        Ok(subject)
    }

    fn property(
        &mut self,
        subject: &Term,
        predicate: &str,
        coerce: bool,
        value: &Value,
    ) -> Result<(), GatekeeperError> {
        let object = match value {
            // Nulls are dropped, so a null property reads as absent.
            Value::Null => return Ok(()),
            Value::Array(values) => {
                for value in values {
                    self.property(subject, predicate, coerce, value)?;
                }
                return Ok(());
            }
            Value::String(s) if coerce => Term::Iri(self.expand_prefix(s)),
            Value::String(s) => literal(s, XSD_STRING),
            Value::Bool(b) => literal(&b.to_string(), XSD_BOOLEAN),
            Value::Number(n) if n.is_i64() || n.is_u64() => literal(&n.to_string(), XSD_INTEGER),
            Value::Number(n) => literal(&n.to_string(), XSD_DOUBLE),
            Value::Object(object) if object.contains_key("@value") => self.value_object(object)?,
            Value::Object(object) => self.node(object)?,
        };
        self.push(subject.clone(), predicate.to_string(), object);
        Ok(())
    }

    fn value_object(&self, object: &Map<String, Value>) -> Result<Term, GatekeeperError> {
        let value = match &object["@value"] {
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            other => {
                return Err(GatekeeperError::Graph(format!(
                    "@value must be a scalar, found {other}"
                )))
            }
        };
        let datatype = match object.get("@type") {
            Some(Value::String(datatype)) => self.expand(datatype),
            Some(other) => {
                return Err(GatekeeperError::Graph(format!(
                    "value @type must be a string, found {other}"
                )))
            }
            None => XSD_STRING.to_string(),
        };
        Ok(Term::Literal { value, datatype })
    }

    fn push(&mut self, subject: Term, predicate: String, object: Term) {
        self.graph.triples.push(Triple {
            subject,
            predicate,
            object,
        });
    }
}

fn literal(value: &str, datatype: &str) -> Term {
    Term::Literal {
        value: value.to_string(),
        datatype: datatype.to_string(),
    }
}

fn string_values<'v>(value: &'v Value, key: &str) -> Result<Vec<&'v str>, GatekeeperError> {
    let invalid = || GatekeeperError::Graph(format!("{key} values must be strings"));
    match value {
        Value::String(s) => Ok(vec![s.as_str()]),
        Value::Array(values) => values
            .iter()
            .map(|v| v.as_str().ok_or_else(invalid))
            .collect(),
        _ => Err(invalid()),
    }
}
