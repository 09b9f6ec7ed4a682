//! Source and normalized metadata records
//!
//! Both records share one field set. A [`SourceRecord`] is whatever an
//! ingestion adapter or a hand-authored file handed us; a [`NormalizedRecord`]
//! is the same data after canonicalization. Neither type is validated on
//! construction: normalization never fails, and the record builder is the one
//! place that rejects missing mandatory facts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw asset metadata as received from an ingestion adapter or source file.
///
/// Every field is optional because upstream quality varies. The on-disk key
/// for the identifier is `identifier`; the older `id` spelling is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// IRI of the asset's landing page
    #[serde(alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// Human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Creator attribution, may contain inline markup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,

    /// Creation date in whatever form upstream provided
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Rights statement (e.g. "CC BY-SA 4.0")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rights_text: Option<String>,

    /// License URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_url: Option<String>,

    /// MIME type of the asset binary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// IRI of the downloadable binary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,

    /// IRI of the agent the record is attributed to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance_agent_id: Option<String>,

    /// Display name of the attributed agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance_agent_label: Option<String>,

    /// When the metadata was generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

/// Source metadata after canonicalization and defaulting.
///
/// Produced only by the normalizer. Text fields carry no markup, blank values
/// are absent, dates are ISO-8601 UTC where they could be parsed and the
/// license URL follows the Creative Commons trailing-slash convention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// IRI of the asset's landing page
    pub identifier: Option<String>,
    /// Human-readable title
    pub title: Option<String>,
    /// Creator attribution
    pub creator: Option<String>,
    /// Creation date
    pub date: Option<String>,
    /// Rights statement
    pub rights_text: Option<String>,
    /// Canonical license URL
    pub license_url: Option<String>,
    /// MIME type
    pub format: Option<String>,
    /// IRI of the downloadable binary
    pub content_url: Option<String>,
    /// IRI of the attributed agent
    pub provenance_agent_id: Option<String>,
    /// Display name of the attributed agent
    pub provenance_agent_label: Option<String>,
    /// Generation timestamp
    pub generated_at: Option<String>,
}

impl NormalizedRecord {
    /// Look up a field by name
    pub fn get(&self, field: SourceField) -> Option<&str> {
        let value = match field {
            SourceField::Identifier => &self.identifier,
            SourceField::Title => &self.title,
            SourceField::Creator => &self.creator,
            SourceField::Date => &self.date,
            SourceField::RightsText => &self.rights_text,
            SourceField::LicenseUrl => &self.license_url,
            SourceField::Format => &self.format,
            SourceField::ContentUrl => &self.content_url,
            SourceField::ProvenanceAgentId => &self.provenance_agent_id,
            SourceField::ProvenanceAgentLabel => &self.provenance_agent_label,
            SourceField::GeneratedAt => &self.generated_at,
        };
        value.as_deref()
    }
}

impl From<NormalizedRecord> for SourceRecord {
    fn from(record: NormalizedRecord) -> Self {
        Self {
            identifier: record.identifier,
            title: record.title,
            creator: record.creator,
            date: record.date,
            rights_text: record.rights_text,
            license_url: record.license_url,
            format: record.format,
            content_url: record.content_url,
            provenance_agent_id: record.provenance_agent_id,
            provenance_agent_label: record.provenance_agent_label,
            generated_at: record.generated_at,
        }
    }
}

/// Names of the source fields, as they appear in source files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceField {
    /// `identifier`
    Identifier,
    /// `title`
    Title,
    /// `creator`
    Creator,
    /// `date`
    Date,
    /// `rights_text`
    RightsText,
    /// `license_url`
    LicenseUrl,
    /// `format`
    Format,
    /// `content_url`
    ContentUrl,
    /// `provenance_agent_id`
    ProvenanceAgentId,
    /// `provenance_agent_label`
    ProvenanceAgentLabel,
    /// `generated_at`
    GeneratedAt,
}

impl SourceField {
    /// The on-disk key for this field
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceField::Identifier => "identifier",
            SourceField::Title => "title",
            SourceField::Creator => "creator",
            SourceField::Date => "date",
            SourceField::RightsText => "rights_text",
            SourceField::LicenseUrl => "license_url",
            SourceField::Format => "format",
            SourceField::ContentUrl => "content_url",
            SourceField::ProvenanceAgentId => "provenance_agent_id",
            SourceField::ProvenanceAgentLabel => "provenance_agent_label",
            SourceField::GeneratedAt => "generated_at",
        }
    }
}

impl fmt::Display for SourceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
