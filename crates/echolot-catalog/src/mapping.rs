//! Mapping from Commons `imageinfo` responses to source records

use crate::api::{ImageInfo, QueryResponse};
use crate::CatalogError;
use chrono::{DateTime, Utc};
use echolot_domain::SourceRecord;
use serde::Deserialize;
use serde_json::Value;

/// Agent every Commons record is attributed to
pub const COMMONS_AGENT_ID: &str = "https://commons.wikimedia.org";

/// Display name of [`COMMONS_AGENT_ID`]
pub const COMMONS_AGENT_LABEL: &str = "Wikimedia Commons";

/// License assumed when the file page declares none
pub const FALLBACK_LICENSE_URL: &str = "https://creativecommons.org/licenses/by-sa/4.0/";

const DEFAULT_MIME: &str = "image/jpeg";

/// Map an `action=query&prop=imageinfo` response for `title` into a source
/// record stamped with `generated_at`.
///
/// # Errors
///
/// - [`CatalogError::MalformedUpstreamResponse`] if the response lacks the
///   query block, the file URL, or every date candidate
/// - [`CatalogError::TitleNotResolved`] if the page is missing or has no
///   image info
pub fn source_from_response(
    title: &str,
    response: &Value,
    generated_at: DateTime<Utc>,
) -> Result<SourceRecord, CatalogError> {
    let malformed = |detail: &str| CatalogError::MalformedUpstreamResponse {
        title: title.to_string(),
        detail: detail.to_string(),
    };

    let response = QueryResponse::deserialize(response).map_err(|e| malformed(&e.to_string()))?;
    let query = response.query.ok_or_else(|| malformed("no query block"))?;
    let page = query
        .pages
        .into_values()
        .next()
        .ok_or_else(|| malformed("no pages"))?;

    let unresolved = || CatalogError::TitleNotResolved {
        title: title.to_string(),
    };
    if page.unresolved() {
        return Err(unresolved());
    }
    let info = page
        .imageinfo
        .and_then(|infos| infos.into_iter().next())
        .ok_or_else(unresolved)?;

    let content_url = info.url.clone().ok_or_else(|| malformed("no file url"))?;
    let date = upload_date(&info).ok_or_else(|| malformed("no date or upload timestamp"))?;
    let page_title = title.replace(' ', "_");

    Ok(SourceRecord {
        identifier: Some(format!("{}/wiki/{}", COMMONS_AGENT_ID, page_title)),
        title: info
            .meta("ObjectName")
            .or_else(|| Some(title.strip_prefix("File:").unwrap_or(title).to_string())),
        creator: info
            .meta("Artist")
            .or_else(|| info.user.clone().filter(|u| !u.trim().is_empty()))
            .or_else(|| Some("Unknown".to_string())),
        date: Some(date),
        rights_text: info.meta("LicenseShortName").or_else(|| info.meta("Credit")),
        license_url: info
            .meta("LicenseUrl")
            .or_else(|| Some(FALLBACK_LICENSE_URL.to_string())),
        format: info
            .mime
            .clone()
            .filter(|m| !m.is_empty())
            .or_else(|| Some(DEFAULT_MIME.to_string())),
        content_url: Some(content_url),
        provenance_agent_id: Some(COMMONS_AGENT_ID.to_string()),
        provenance_agent_label: Some(COMMONS_AGENT_LABEL.to_string()),
        generated_at: Some(generated_at.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
    })
}

/// Original capture date, else metadata date, else the upload day
fn upload_date(info: &ImageInfo) -> Option<String> {
    info.meta("DateTimeOriginal")
        .or_else(|| info.meta("DateTime"))
        .or_else(|| {
            info.timestamp
                .as_deref()
                .and_then(|stamp| stamp.get(..10))
                .map(str::to_string)
        })
}
