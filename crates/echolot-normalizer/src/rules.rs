//! Canonicalization rules for individual field values

use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

// Date and time separated by a space or `T`, no zone designator.
static LOCAL_DATE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})[ T](\d{2}:\d{2}:\d{2})$").expect("date pattern is valid")
});

/// Creative Commons URL prefixes whose canonical form ends with `/`
const CC_PREFIXES: [&str; 4] = [
    "https://creativecommons.org/licenses/",
    "https://creativecommons.org/publicdomain/",
    "http://creativecommons.org/licenses/",
    "http://creativecommons.org/publicdomain/",
];

const PROTOCOL_RELATIVE_CC: &str = "//creativecommons.org/";

/// Remove all tag-like substrings, then trim.
///
/// Lossy on purpose: entities are not decoded and emphasis is dropped. The
/// only goal is to keep raw markup out of descriptive literals.
pub fn strip_markup(value: &str) -> String {
    TAG_RE.replace_all(value, "").trim().to_string()
}

/// Rewrite `YYYY-MM-DD[ T]HH:MM:SS` to `YYYY-MM-DDTHH:MM:SSZ`.
///
/// Values already in Zulu form, and values in any other shape, are returned
/// unchanged. A value that matches the pattern but is not a real calendar
/// date/time (`2024-13-40 25:00:00`) is also returned unchanged.
pub fn canonicalize_date(value: &str) -> String {
    let Some(captures) = LOCAL_DATE_TIME_RE.captures(value) else {
        return value.to_string();
    };
    let (date, time) = (&captures[1], &captures[2]);

    match NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S") {
        Ok(parsed) => parsed.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        Err(_) => value.to_string(),
    }
}

/// Whether a URL points into one of the Creative Commons license trees
pub fn is_creative_commons(url: &str) -> bool {
    CC_PREFIXES.iter().any(|prefix| url.starts_with(prefix))
}

/// Canonicalize a license URL.
///
/// Protocol-relative Creative Commons URLs are made absolute with `https:`,
/// and Creative Commons URLs are forced to end with `/`. Every other URL is
/// returned trimmed but otherwise unchanged.
pub fn canonicalize_license_url(url: &str) -> String {
    let mut url = url.trim().to_string();

    if url.starts_with(PROTOCOL_RELATIVE_CC) {
        url.insert_str(0, "https:");
    }

    if is_creative_commons(&url) && !url.ends_with('/') {
        url.push('/');
    }

    url
}
