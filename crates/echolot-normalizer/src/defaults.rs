//! Defaulting rules for absent fields

use crate::rules::is_creative_commons;

/// Sentinel creator used when upstream names nobody
pub const UNKNOWN_CREATOR: &str = "Unknown";

/// Default value for an absent or blank creator
pub fn default_creator() -> String {
    UNKNOWN_CREATOR.to_string()
}

/// Derive a short rights statement from a Creative Commons license URL.
///
/// Returns `None` for anything that is not a recognized Creative Commons URL.
///
/// | URL path                    | Result                   |
/// |-----------------------------|--------------------------|
/// | `licenses/by-sa/4.0/`       | `CC BY-SA 4.0`           |
/// | `licenses/by/3.0/de/`       | `CC BY 3.0 de`           |
/// | `publicdomain/zero/1.0/`    | `CC0 1.0`                |
/// | `publicdomain/mark/1.0/`    | `Public Domain Mark 1.0` |
pub fn default_rights_text(license_url: &str) -> Option<String> {
    if !is_creative_commons(license_url) {
        return None;
    }

    let (_, path) = license_url.split_once("creativecommons.org/")?;
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        ["licenses", code, version, rest @ ..] => {
            let mut text = format!("CC {} {}", code.to_uppercase(), version);
            if let Some(jurisdiction) = rest.first() {
                text.push(' ');
                text.push_str(jurisdiction);
            }
            Some(text)
        }
        ["publicdomain", "zero", version, ..] => Some(format!("CC0 {version}")),
        ["publicdomain", "mark", version, ..] => Some(format!("Public Domain Mark {version}")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_creator() {
        assert_eq!(default_creator(), "Unknown");
    }

    #[test]
    fn test_rights_from_attribution_license() {
        assert_eq!(
            default_rights_text("https://creativecommons.org/licenses/by-sa/4.0/").as_deref(),
            Some("CC BY-SA 4.0")
        );
    }

    #[test]
    fn test_rights_from_ported_license() {
        assert_eq!(
            default_rights_text("https://creativecommons.org/licenses/by/3.0/de/").as_deref(),
            Some("CC BY 3.0 de")
        );
    }

    #[test]
    fn test_rights_from_public_domain_tools() {
        assert_eq!(
            default_rights_text("https://creativecommons.org/publicdomain/zero/1.0/").as_deref(),
            Some("CC0 1.0")
        );
        assert_eq!(
            default_rights_text("http://creativecommons.org/publicdomain/mark/1.0/").as_deref(),
            Some("Public Domain Mark 1.0")
        );
    }

    #[test]
    fn test_no_rights_for_other_urls() {
        assert!(default_rights_text("https://www.gnu.org/licenses/fdl-1.3.html").is_none());
        assert!(default_rights_text("https://creativecommons.org/licenses/").is_none());
    }
}
