pub mod config;
#[cfg(test)]
pub mod memory;
pub mod readeck;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::app::Result;
use crate::domain::{Bookmark, BookmarkPage};

pub use config::BackendConfig;
pub use readeck::{request_token, Credentials, ReadeckStore};

/// Capabilities the translation engine needs from a bookmark store.
#[async_trait]
pub trait BookmarkStore {
    async fn list(&self, query: &ListQuery) -> Result<BookmarkPage>;
    async fn fetch_one(&self, id: &str) -> Result<Bookmark>;
    /// Article body of a bookmark as an HTML document.
    async fn fetch_article(&self, id: &str) -> Result<String>;
    /// Returns the identifier the store assigned, when it reports one.
    async fn insert(&self, bookmark: &NewBookmark) -> Result<Option<String>>;
    async fn patch(&self, id: &str, patch: &BookmarkPatch) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    CreatedAsc,
    #[default]
    CreatedDesc,
    Title,
    Domain,
}

impl SortOrder {
    pub fn as_param(self) -> &'static str {
        match self {
            SortOrder::CreatedAsc => "created",
            SortOrder::CreatedDesc => "-created",
            SortOrder::Title => "title",
            SortOrder::Domain => "domain",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentKind {
    #[default]
    Article,
    Video,
    Photo,
}

impl ContentKind {
    pub fn as_param(self) -> &'static str {
        match self {
            ContentKind::Article => "article",
            ContentKind::Video => "video",
            ContentKind::Photo => "photo",
        }
    }
}

/// Query parameters of a store listing. `None` fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub updated_since: Option<DateTime<Utc>>,
    pub is_archived: Option<bool>,
    pub is_marked: Option<bool>,
    pub sort: SortOrder,
    /// `None` lists every content type.
    pub kind: Option<ContentKind>,
}

impl ListQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let flag = |value: bool| String::from(if value { "1" } else { "0" });

        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        if let Some(since) = self.updated_since {
            params.push((
                "updated_since",
                since.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        if let Some(archived) = self.is_archived {
            params.push(("is_archived", flag(archived)));
        }
        if let Some(marked) = self.is_marked {
            params.push(("is_marked", flag(marked)));
        }
        params.push(("sort", self.sort.as_param().to_string()));
        if let Some(kind) = self.kind {
            params.push(("type", kind.as_param().to_string()));
        }
        params
    }
}

/// Partial update of a bookmark. Only `Some` fields are serialized so the
/// store leaves every other field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_marked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookmark {
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_query_params() {
        let params = ListQuery::default().to_params();
        assert_eq!(params, vec![("sort", "-created".to_string())]);
    }

    #[test]
    fn test_full_query_params() {
        let query = ListQuery {
            limit: Some(30),
            offset: Some(10),
            updated_since: Some(Utc.timestamp_opt(0, 0).unwrap()),
            is_archived: Some(false),
            is_marked: Some(true),
            sort: SortOrder::Domain,
            kind: Some(ContentKind::Photo),
        };
        let params = query.to_params();
        assert_eq!(
            params,
            vec![
                ("limit", "30".to_string()),
                ("offset", "10".to_string()),
                ("updated_since", "1970-01-01T00:00:00Z".to_string()),
                ("is_archived", "0".to_string()),
                ("is_marked", "1".to_string()),
                ("sort", "domain".to_string()),
                ("type", "photo".to_string()),
            ]
        );
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = BookmarkPatch {
            is_archived: Some(true),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"is_archived":true}"#
        );
    }

    #[test]
    fn test_new_bookmark_omits_empty_title() {
        let bookmark = NewBookmark {
            url: "https://example.com".into(),
            title: String::new(),
        };
        assert_eq!(
            serde_json::to_string(&bookmark).unwrap(),
            r#"{"url":"https://example.com"}"#
        );
    }
}
