//! MediaWiki `imageinfo` response types

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Top-level `action=query` response
#[derive(Debug, Deserialize)]
pub(crate) struct QueryResponse {
    pub query: Option<Query>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Query {
    // Keyed by page id; missing pages use negative ids.
    #[serde(default)]
    pub pages: BTreeMap<String, Page>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Page {
    #[serde(default)]
    pub missing: Option<Value>,
    #[serde(default)]
    pub invalid: Option<Value>,
    #[serde(default)]
    pub imageinfo: Option<Vec<ImageInfo>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageInfo {
    pub url: Option<String>,
    pub user: Option<String>,
    pub mime: Option<String>,
    pub timestamp: Option<String>,
    #[serde(default)]
    pub extmetadata: BTreeMap<String, MetadataEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MetadataEntry {
    #[serde(default)]
    pub value: Value,
}

impl ImageInfo {
    /// A non-empty extended metadata value as text
    pub fn meta(&self, key: &str) -> Option<String> {
        let text = match &self.extmetadata.get(key)?.value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }
}

impl Page {
    /// Whether the API flagged the title as missing or invalid
    pub fn unresolved(&self) -> bool {
        self.missing.is_some() || self.invalid.is_some()
    }
}
