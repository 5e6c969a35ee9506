use chrono::{DateTime, FixedOffset};
use serde::de;
use serde::{Deserialize, Deserializer};

/// Deserialize an RFC 3339 timestamp, treating an empty string or null as `None`.
///
/// Search documents report `"datetime": ""` when the source has no date.
pub fn empty_as_none_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => DateTime::parse_from_rfc3339(s).map(Some).map_err(de::Error::custom),
    }
}
