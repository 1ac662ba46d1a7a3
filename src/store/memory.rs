//! In-memory [`BookmarkStore`] used by the engine and server tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::app::{BridgeError, Result};
use crate::domain::{Bookmark, BookmarkPage};
use crate::store::{BookmarkPatch, BookmarkStore, ListQuery, NewBookmark};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(ListQuery),
    FetchOne(String),
    FetchArticle(String),
    Insert(NewBookmark),
    Patch(String, BookmarkPatch),
}

#[derive(Default)]
pub struct MemoryStore {
    pub bookmarks: Vec<Bookmark>,
    pub total: u64,
    pub articles: HashMap<String, String>,
    pub inserted_id: Option<String>,
    /// Patches on these ids fail with a 404.
    pub rejected_ids: Vec<String>,
    /// Patches on these ids fail before reaching the store.
    pub unreachable_ids: Vec<String>,
    /// Largest page the store hands out, whatever the requested limit.
    pub max_page: Option<usize>,
    pub(crate) calls: Mutex<Vec<Call>>,
}

impl MemoryStore {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn log(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn bookmark(id: &str) -> Bookmark {
    Bookmark {
        id: id.into(),
        url: format!("https://example.com/{}", id),
        title: format!("Post {}", id),
        kind: "article".into(),
        ..Default::default()
    }
}

fn not_found() -> BridgeError {
    BridgeError::BackendRejected {
        status: 404,
        message: "404 Not Found".into(),
    }
}

/// A transport error, as if the store could not be reached at all.
fn unreachable() -> BridgeError {
    let err = reqwest::Client::new()
        .get("http://")
        .build()
        .unwrap_err();
    BridgeError::BackendUnavailable(err)
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn list(&self, query: &ListQuery) -> Result<BookmarkPage> {
        self.log(Call::List(query.clone()));
        let offset = query.offset.unwrap_or(0) as usize;
        let limit = query
            .limit
            .map(|l| l as usize)
            .unwrap_or(usize::MAX)
            .min(self.max_page.unwrap_or(usize::MAX));
        let bookmarks = self
            .bookmarks
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok(BookmarkPage {
            bookmarks,
            total: self.total,
        })
    }

    async fn fetch_one(&self, id: &str) -> Result<Bookmark> {
        self.log(Call::FetchOne(id.into()));
        self.bookmarks
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn fetch_article(&self, id: &str) -> Result<String> {
        self.log(Call::FetchArticle(id.into()));
        Ok(self.articles.get(id).cloned().unwrap_or_default())
    }

    async fn insert(&self, bookmark: &NewBookmark) -> Result<Option<String>> {
        self.log(Call::Insert(bookmark.clone()));
        Ok(self.inserted_id.clone())
    }

    async fn patch(&self, id: &str, patch: &BookmarkPatch) -> Result<()> {
        self.log(Call::Patch(id.into(), patch.clone()));
        if self.unreachable_ids.iter().any(|u| u == id) {
            return Err(unreachable());
        }
        if self.rejected_ids.iter().any(|r| r == id) {
            return Err(not_found());
        }
        Ok(())
    }
}
