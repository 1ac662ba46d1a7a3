use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Name of the sub-resource used as the cover image.
pub const COVER_IMAGE: &str = "image";

/// A bookmark record as served by the store.
///
/// Every field is optional on the wire. Missing or `null` values fall back to
/// their defaults so a sparse record still translates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bookmark {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub href: String,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub published: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient_integer")]
    pub state: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub loaded: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub site_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub site: String,
    #[serde(deserialize_with = "lenient_strings")]
    pub authors: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub lang: String,
    #[serde(deserialize_with = "null_as_default")]
    pub text_direction: String,
    #[serde(deserialize_with = "null_as_default")]
    pub document_type: String,
    /// "article", "video" or "photo".
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub has_article: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_deleted: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_marked: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_archived: bool,
    #[serde(deserialize_with = "lenient_integer")]
    pub read_progress: i64,
    #[serde(deserialize_with = "lenient_integer")]
    pub word_count: i64,
    /// Estimated reading time in minutes.
    #[serde(deserialize_with = "lenient_optional_integer")]
    pub reading_time: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub resources: BTreeMap<String, Resource>,
}

impl Bookmark {
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name)
    }

    pub fn cover_image(&self) -> Option<&Resource> {
        self.resource(COVER_IMAGE)
    }
}

/// A named sub-resource attached to a bookmark (cover image, icon, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    #[serde(deserialize_with = "null_as_default")]
    pub src: String,
    #[serde(deserialize_with = "lenient_integer")]
    pub width: i64,
    #[serde(deserialize_with = "lenient_integer")]
    pub height: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Integers pass through, floats are truncated, anything else is absent.
fn lenient_optional_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| {
        v.as_i64()
            .or_else(|| v.as_u64().map(|n| n.min(i64::MAX as u64) as i64))
            .or_else(|| v.as_f64().map(|n| n as i64))
    }))
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_integer(deserializer)?.unwrap_or_default())
}

/// A list of strings where `null` entries are dropped.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default().into_iter().flatten().collect())
}

/// Accepts RFC-3339 strings; anything else reads as an absent timestamp.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

/// One page of a store listing.
#[derive(Debug, Clone, Default)]
pub struct BookmarkPage {
    pub bookmarks: Vec<Bookmark>,
    /// Value of the store's count header for the query, 0 when absent.
    pub total: u64,
}
