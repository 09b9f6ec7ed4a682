//! Echolot Normalizer
//!
//! Field-level canonicalization of ingested asset metadata.
//!
//! # Overview
//!
//! Upstream metadata is inconsistent: creators arrive wrapped in HTML, dates
//! use a space instead of `T`, license URLs drop their trailing slash. The
//! normalizer rewrites each field into one canonical form and fills in
//! defaults where a sensible one exists.
//!
//! Normalization never fails. Values it does not recognize pass through
//! unchanged, and the record builder or the conformance check decides whether
//! the result is usable.
//!
//! # Architecture
//!
//! ```text
//! SourceRecord → normalize → NormalizedRecord → RecordBuilder
//! ```
//!
//! # Example Usage
//!
//! ```
//! use echolot_domain::SourceRecord;
//! use echolot_normalizer::normalize;
//!
//! let source = SourceRecord {
//!     creator: Some("<span>Jane Doe</span>".to_string()),
//!     date: Some("2024-05-01 10:00:00".to_string()),
//!     license_url: Some("https://creativecommons.org/licenses/by/4.0".to_string()),
//!     ..Default::default()
//! };
//!
//! let normalized = normalize(source);
//! assert_eq!(normalized.creator.as_deref(), Some("Jane Doe"));
//! assert_eq!(normalized.date.as_deref(), Some("2024-05-01T10:00:00Z"));
//! assert_eq!(normalized.rights_text.as_deref(), Some("CC BY 4.0"));
//! ```

#![warn(missing_docs)]

mod defaults;
mod normalizer;
mod rules;

pub use defaults::{default_creator, default_rights_text, UNKNOWN_CREATOR};
pub use normalizer::normalize;
pub use rules::{canonicalize_date, canonicalize_license_url, is_creative_commons, strip_markup};
