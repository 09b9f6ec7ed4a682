//! Echolot Record Builder
//!
//! Maps a normalized source into the fixed-shape provenance record.
//!
//! Construction is the one pipeline stage allowed to fail: a record missing a
//! mandatory provenance fact must never reach signing or publication, so any
//! absent mandatory field yields [`BuildError::MissingRequiredField`].
//!
//! # Examples
//!
//! ```
//! use echolot_builder::construct;
//! use echolot_domain::NormalizedRecord;
//!
//! let record = NormalizedRecord::default();
//! let err = construct(record).unwrap_err();
//! assert_eq!(err.to_string(), "Missing required field 'identifier' in source record");
//! ```

#![warn(missing_docs)]

mod builder;
mod error;
mod template;

pub use builder::{construct, REQUIRED_FIELDS};
pub use error::BuildError;
pub use template::{template, RecordTemplate};
