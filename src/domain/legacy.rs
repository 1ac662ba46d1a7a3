//! Wire shapes of the legacy read-it-later protocol.
//!
//! Field names follow the protocol exactly, including its mix of
//! `snake_case` and `camelCase` keys and its habit of sending numbers as
//! decimal strings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of a list (`/v3/get`) request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetRequest {
    pub access_token: String,
    pub consumer_key: String,
    /// "article", "video" or "image".
    #[serde(rename = "contentType")]
    pub content_type: String,
    /// "simple" or "complete".
    #[serde(rename = "detailType")]
    pub detail_type: String,
    /// "unread", "archive" or "all".
    pub state: String,
    /// "0" for only unfavorited, "1" for only favorited, "" for both.
    pub favorite: String,
    /// "oldest", "newest", "title" or "site".
    pub sort: String,
    pub count: Option<i64>,
    pub offset: Option<i64>,
    /// Unix seconds.
    pub since: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetResponse {
    #[serde(rename = "maxActions")]
    pub max_actions: i64,
    pub cachetype: String,
    pub status: i64,
    pub error: Option<String>,
    pub complete: i64,
    pub since: i64,
    pub list: BTreeMap<String, ListItem>,
    pub total: u64,
}

/// The protocol always sends an (empty) tag object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tags {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub item_id: String,
    pub favorite: String,
    /// "0" normal, "1" archived, "2" deleted.
    pub status: String,
    pub time_added: String,
    pub time_updated: String,
    pub time_favorited: String,
    pub tags: Tags,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub top_image_url: String,
    pub resolved_id: String,
    pub given_url: String,
    pub given_title: String,
    pub resolved_title: String,
    pub resolved_url: String,
    pub excerpt: String,
    pub is_article: String,
    pub is_index: String,
    pub has_video: String,
    pub has_image: String,
    pub word_count: String,
    pub lang: String,
    /// Minutes.
    pub time_to_read: i64,
    pub listen_duration_estimate: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_metadata: Option<DomainMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<BTreeMap<String, Author>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainMetadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub logo: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub greyscale_logo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub author_id: String,
    pub name: String,
    pub url: String,
    pub item_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub item_id: String,
    pub image_id: String,
    pub src: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub width: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub height: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub credit: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub caption: String,
}

/// One entry of a `/v3/send` batch. Holds the union of every action's fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SendAction {
    pub action: String,
    pub item_id: String,
    /// Unix seconds.
    pub time: i64,
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SendRequest {
    pub access_token: String,
    pub actions: Vec<SendAction>,
    pub consumer_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SendError {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub code: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SendResponse {
    /// 1 when every action succeeded, 0 otherwise.
    pub status: i64,
    pub action_errors: Vec<Option<SendError>>,
    pub action_results: Vec<bool>,
}

/// Response to the form-encoded article text (`/v3beta/text`) request.
///
/// Images are not sent as `<img>` tags: `article` carries `<!--IMG_n-->`
/// comments where `n` is the key of the image in `images`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleText {
    pub given_url: String,
    pub item_id: String,
    pub normal_url: String,
    pub resolved_normal_url: String,
    pub date_resolved: String,
    pub domain_id: String,
    pub origin_domain_id: String,
    pub mime_type: String,
    pub content_length: String,
    pub encoding: String,
    pub time_first_parsed: String,
    pub has_old_dupes: String,
    pub innerdomain_redirect: String,
    pub time_to_read: i64,
    pub has_image: String,
    pub has_video: String,
    pub resolved_id: String,
    #[serde(rename = "resolvedUrl")]
    pub resolved_url: String,
    pub host: String,
    pub title: String,
    #[serde(rename = "datePublished")]
    pub date_published: String,
    #[serde(rename = "timePublished")]
    pub time_published: i64,
    #[serde(rename = "responseCode")]
    pub response_code: String,
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<BTreeMap<String, Author>>,
    pub images: BTreeMap<String, Image>,
    pub videos: String,
    #[serde(rename = "wordCount")]
    pub word_count: i64,
    #[serde(rename = "isArticle")]
    pub is_article: i64,
    #[serde(rename = "isVideo")]
    pub is_video: i64,
    #[serde(rename = "isIndex")]
    pub is_index: i64,
    #[serde(rename = "usedFallback")]
    pub used_fallback: i64,
    #[serde(rename = "requiresLogin")]
    pub requires_login: i64,
    pub lang: String,
    #[serde(rename = "topImageUrl")]
    pub top_image_url: String,
    #[serde(
        rename = "domainMetadata",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub domain_metadata: Option<DomainMetadata>,
    pub article: String,
}
