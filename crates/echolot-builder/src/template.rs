//! The shared record template

use echolot_domain::{vocab, ProvenanceContext};
use std::sync::LazyLock;

static TEMPLATE: LazyLock<RecordTemplate> = LazyLock::new(|| RecordTemplate {
    context: ProvenanceContext::standard(),
    types: vocab::RECORD_TYPES.iter().map(|t| t.to_string()).collect(),
});

/// Context and type declaration common to every provenance record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTemplate {
    /// `@context` block
    pub context: ProvenanceContext,
    /// Declared classes
    pub types: Vec<String>,
}

/// The process-wide template.
///
/// Read-only; callers clone it to obtain an owned copy for a new record.
pub fn template() -> &'static RecordTemplate {
    &TEMPLATE
}
