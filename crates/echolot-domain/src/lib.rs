//! Echolot Domain Layer
//!
//! Shared data model for the provenance metadata pipeline. Every other crate
//! in the workspace depends on these types; this crate itself holds no I/O and
//! no pipeline logic.
//!
//! ## Key Concepts
//!
//! - **SourceRecord**: raw, possibly incomplete asset metadata as ingested
//! - **NormalizedRecord**: the same fields after canonicalization and defaulting
//! - **ProvenanceRecord**: the fixed-shape JSON-LD document built from a normalized source
//! - **RunId**: identifier for one pipeline run, used to correlate log output
//!
//! ## Pipeline
//!
//! ```text
//! SourceRecord → normalize → NormalizedRecord → construct → ProvenanceRecord → validate
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod provenance;
pub mod run;
pub mod source;
pub mod vocab;

// Re-exports for convenience
pub use provenance::{
    AttributedTo, DerivedFrom, IriRef, ProvenanceContext, ProvenanceRecord, TermDefinition,
    TypedLiteral,
};
pub use run::RunId;
pub use source::{NormalizedRecord, SourceField, SourceRecord};
