//! Record-level normalization

use crate::defaults::{default_creator, default_rights_text};
use crate::rules::{canonicalize_date, canonicalize_license_url, strip_markup};
use echolot_domain::{NormalizedRecord, SourceRecord};
use tracing::debug;

/// Normalize a source record.
///
/// Pure and infallible. Applying it to its own output yields the same record.
///
/// - text fields (title, creator, rights text, agent label) lose their markup
/// - every field is trimmed and blank values become absent
/// - `date` and `generated_at` are canonicalized to ISO-8601 UTC when possible
/// - the license URL is canonicalized
/// - creator and rights text are defaulted when absent
pub fn normalize(source: SourceRecord) -> NormalizedRecord {
    let license_url = clean(source.license_url).map(|url| canonicalize_license_url(&url));

    let rights_text = text(source.rights_text)
        .or_else(|| text(license_url.as_deref().and_then(default_rights_text)));

    NormalizedRecord {
        identifier: clean(source.identifier),
        title: text(source.title),
        creator: Some(text(source.creator).unwrap_or_else(default_creator)),
        date: clean(source.date).map(|d| date("date", &d)),
        rights_text,
        license_url,
        format: clean(source.format),
        content_url: clean(source.content_url),
        provenance_agent_id: clean(source.provenance_agent_id),
        provenance_agent_label: text(source.provenance_agent_label),
        generated_at: clean(source.generated_at).map(|d| date("generated_at", &d)),
    }
}

/// Trim a value; blank becomes absent
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Strip markup from a descriptive value; blank becomes absent
fn text(value: Option<String>) -> Option<String> {
    value.map(|v| strip_markup(&v)).filter(|v| !v.is_empty())
}

fn date(field: &str, value: &str) -> String {
    let canonical = canonicalize_date(value);
    if canonical == value && !value.ends_with('Z') {
        debug!(field, value, "Date shape not recognized, passing through unchanged");
    }
    canonical
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    // Fragments that exercise every rule: markup, padding, date shapes and
    // license URLs with and without the trailing slash.
    fn field() -> impl Strategy<Value = Option<String>> {
        let fragment = prop_oneof![
            Just("<span>".to_string()),
            Just("</span>".to_string()),
            Just("<".to_string()),
            Just(">".to_string()),
            Just(" ".to_string()),
            Just("2024-05-01 10:00:00".to_string()),
            Just("2024-05-01T10:00:00Z".to_string()),
            Just("https://creativecommons.org/licenses/by/4.0".to_string()),
            Just("//creativecommons.org/publicdomain/zero/1.0".to_string()),
            "[a-zA-Z0-9 ]{0,8}",
        ];
        proptest::option::of(prop::collection::vec(fragment, 0..4).prop_map(|parts| parts.concat()))
    }

    fn source_record() -> impl Strategy<Value = SourceRecord> {
        (
            (field(), field(), field(), field(), field(), field()),
            (field(), field(), field(), field(), field()),
        )
            .prop_map(
                |(
                    (identifier, title, creator, date, rights_text, license_url),
                    (format, content_url, provenance_agent_id, provenance_agent_label, generated_at),
                )| SourceRecord {
                    identifier,
                    title,
                    creator,
                    date,
                    rights_text,
                    license_url,
                    format,
                    content_url,
                    provenance_agent_id,
                    provenance_agent_label,
                    generated_at,
                },
            )
    }

    proptest! {
        /// Property: normalizing a normalized record changes nothing
        #[test]
        fn test_normalize_idempotent(source in source_record()) {
            let once = normalize(source);
            let twice = normalize(once.clone().into());
            prop_assert_eq!(once, twice);
        }

        /// Property: normalized text fields never contain a complete tag
        #[test]
        fn test_no_markup_survives(source in source_record()) {
            let normalized = normalize(source);
            for value in [&normalized.title, &normalized.creator, &normalized.rights_text]
                .into_iter()
                .flatten()
            {
                prop_assert!(!TAG.is_match(value), "markup left in {:?}", value);
            }
        }
    }

    static TAG: std::sync::LazyLock<regex::Regex> =
        std::sync::LazyLock::new(|| regex::Regex::new(r"<[^>]*>").unwrap());
}
