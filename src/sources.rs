//! Source catalogue: fetch, validate, normalize
//!
//! The extensions registry publishes an untyped JSON index maintained by
//! hand. Validation is all-or-nothing per entry; a malformed entry is
//! dropped with a reason, never a partial record, and malformed input as a
//! whole degrades to an empty catalogue rather than an error.

use serde_json::Value;

/// Base URL the APK files are served from.
const SOURCES_DOWNLOAD_BASE: &str =
    "https://raw.githubusercontent.com/IReaderorg/IReader-extensions/refs/heads/repo/apk";

/// One installable content source from the registry index.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSummary {
    pub id: String,
    pub name: String,
    pub version: String,
    /// 2-letter language code
    pub lang: String,
    /// APK filename within the repository
    pub apk: String,
}

/// Why a registry entry was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reject {
    /// Array element was null or not an object
    NotAnObject,
    /// Required field absent, wrong type, or empty after trimming
    MissingField(&'static str),
    /// `id` was present but neither a string nor a number
    InvalidId,
}

fn string_field(record: &Value, key: &'static str) -> Result<String, Reject> {
    match record.get(key) {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Err(Reject::MissingField(key))
            } else {
                Ok(trimmed.to_string())
            }
        }
        _ => Err(Reject::MissingField(key)),
    }
}

/// Validate one raw registry entry into a [`SourceSummary`] or a drop
/// reason. `id` additionally accepts a JSON number, stringified; the other
/// fields must be non-empty strings.
pub fn validate_entry(entry: &Value) -> Result<SourceSummary, Reject> {
    let record = entry.as_object().ok_or(Reject::NotAnObject)?;

    let id = match record.get("id") {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(Reject::MissingField("id"));
            }
            trimmed.to_string()
        }
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => return Err(Reject::InvalidId),
        None => return Err(Reject::MissingField("id")),
    };

    Ok(SourceSummary {
        id,
        name: string_field(entry, "name")?,
        version: string_field(entry, "version")?,
        lang: string_field(entry, "lang")?,
        apk: string_field(entry, "apk")?,
    })
}

/// Parse the registry payload into a clean catalogue, sorted ascending by
/// name. Non-array input yields an empty list; invalid entries are
/// excluded. This never fails on malformed input.
pub fn parse_sources(payload: &Value) -> Vec<SourceSummary> {
    let entries = match payload.as_array() {
        Some(entries) => entries,
        None => return Vec::new(),
    };

    let mut sources: Vec<SourceSummary> = entries
        .iter()
        .filter_map(|entry| validate_entry(entry).ok())
        .collect();

    sources.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    sources
}

/// Download link for a source's APK within the extensions repository.
pub fn download_url(source: &SourceSummary) -> String {
    format!("{}/{}", SOURCES_DOWNLOAD_BASE, source.apk)
}

/// Unique language codes across the catalogue, sorted, for the filter
/// dropdown.
pub fn available_languages(sources: &[SourceSummary]) -> Vec<String> {
    let mut langs: Vec<String> = sources.iter().map(|s| s.lang.clone()).collect();
    langs.sort();
    langs.dedup();
    langs
}

/// Fetch and parse the registry index.
///
/// Unlike the release feed this surfaces fetch failures to the caller, which
/// shows a page-level error with a retry action. The parse step itself
/// never fails.
#[cfg(feature = "full")]
pub fn fetch_sources(
    index_url: &str,
    user_agent: &str,
) -> Result<Vec<SourceSummary>, Box<dyn std::error::Error>> {
    use crate::logging::{log_fetch, log_parse};

    log_fetch(&format!("Fetching source index from {}", index_url));

    let payload: Value = ureq::get(index_url)
        .set("User-Agent", user_agent)
        .call()?
        .into_json()?;

    let total = payload.as_array().map(Vec::len).unwrap_or(0);
    let sources = parse_sources(&payload);
    if sources.len() < total {
        log_parse(&format!(
            "Dropped {} malformed registry entries",
            total - sources.len()
        ));
    }
    Ok(sources)
}
