//! The translation engine between the legacy protocol and the store.
//!
//! - [`query`]: legacy list request → store query
//! - [`record`]: store record → legacy list item / article text
//! - [`article`]: article HTML → placeholder-comment encoding
//! - [`mutation`]: legacy action verb → store update
//! - [`cache`]: URL → store identifier lookup
//!
//! [`Translator`] ties them to a [`BookmarkStore`].

pub mod article;
pub mod cache;
pub mod mutation;
pub mod query;
pub mod record;

use std::sync::Arc;

use crate::app::{BridgeError, Result};
use crate::domain::{
    ArticleText, GetRequest, GetResponse, SendAction, SendError, SendRequest, SendResponse,
};
use crate::store::{BookmarkStore, ListQuery, SortOrder};

pub use article::{rewrite_article, RewrittenArticle};
pub use cache::UrlIdCache;
pub use mutation::{dispatch, Mutation};
pub use query::translate_query;
pub use record::{to_article_text, to_list_item, translate_record};

pub const DEFAULT_PAGE_SIZE: u64 = 100;

pub struct Translator {
    store: Arc<dyn BookmarkStore + Send + Sync>,
    cache: UrlIdCache,
}

impl Translator {
    pub fn new(store: Arc<dyn BookmarkStore + Send + Sync>) -> Self {
        Self {
            store,
            cache: UrlIdCache::new(),
        }
    }

    pub fn cache(&self) -> &UrlIdCache {
        &self.cache
    }

    /// Answer a legacy list request.
    pub async fn get(&self, req: &GetRequest) -> Result<GetResponse> {
        let query = translate_query(req);
        let page = self.store.list(&query).await?;

        let list = page
            .bookmarks
            .iter()
            .map(|bookmark| (bookmark.id.clone(), translate_record(bookmark, &self.cache)))
            .collect();

        tracing::debug!(
            "Listed {} of {} bookmarks",
            page.bookmarks.len(),
            page.total
        );

        Ok(GetResponse {
            status: 1,
            list,
            total: page.total,
            ..Default::default()
        })
    }

    /// Apply a batch of legacy actions in order.
    ///
    /// A failed action is reported in its own slot and does not stop the
    /// rest of the batch.
    pub async fn send(&self, req: &SendRequest) -> SendResponse {
        let mut response = SendResponse {
            status: 1,
            action_errors: Vec::with_capacity(req.actions.len()),
            action_results: Vec::with_capacity(req.actions.len()),
        };

        for action in &req.actions {
            match self.apply(action).await {
                Ok(()) => {
                    response.action_results.push(true);
                    response.action_errors.push(None);
                }
                Err(e) => {
                    tracing::warn!("Action {} on {} failed: {}", action.action, action.item_id, e);
                    response.status = 0;
                    response.action_results.push(false);
                    response.action_errors.push(Some(send_error(action, &e)));
                }
            }
        }

        tracing::info!(
            "Applied {} actions, {} failed",
            req.actions.len(),
            response.action_results.iter().filter(|ok| !**ok).count()
        );

        response
    }

    async fn apply(&self, action: &SendAction) -> Result<()> {
        match dispatch(action) {
            Mutation::Insert(bookmark) => match self.store.insert(&bookmark).await? {
                Some(id) => self.cache.record(&bookmark.url, &id),
                None => tracing::warn!("Store did not return an id for {}", bookmark.url),
            },
            Mutation::Patch { id, patch } => self.store.patch(&id, &patch).await?,
            Mutation::Ignore => {
                tracing::debug!("Ignoring unsupported action {:?}", action.action);
            }
        }
        Ok(())
    }

    /// Answer a legacy article text request.
    ///
    /// The URL must have been seen by a previous listing or insert; a miss
    /// fails before the store is contacted.
    pub async fn article_text(&self, url: &str) -> Result<ArticleText> {
        let id = self
            .cache
            .lookup(url)
            .ok_or_else(|| BridgeError::CacheMiss(url.to_string()))?;

        let bookmark = self.store.fetch_one(&id).await?;
        let html = self.store.fetch_article(&id).await?;
        let article = rewrite_article(&html, &id)?;

        Ok(to_article_text(&bookmark, article))
    }

    /// Page through every bookmark in the store, recording each URL.
    ///
    /// Follows the store's reported total when there is one, otherwise stops
    /// at the first short page. Returns the number of bookmarks seen.
    pub async fn refresh_cache(&self, page_size: u64) -> Result<usize> {
        let page_size = page_size.max(1);
        let mut offset = 0;

        loop {
            let query = ListQuery {
                limit: Some(page_size),
                offset: Some(offset),
                sort: SortOrder::CreatedAsc,
                kind: None,
                ..Default::default()
            };
            let page = self.store.list(&query).await?;
            let count = page.bookmarks.len() as u64;

            for bookmark in &page.bookmarks {
                self.cache.record(&bookmark.url, &bookmark.id);
            }
            offset += count;

            // A store may cap pages below the requested size, so a short
            // page only ends the walk when no total was reported.
            let done = if page.total > 0 {
                offset >= page.total
            } else {
                count < page_size
            };
            if count == 0 || done {
                break;
            }
        }

        tracing::info!("Cached {} bookmark URLs", offset);
        Ok(offset as usize)
    }
}

fn send_error(action: &SendAction, err: &BridgeError) -> SendError {
    let code = match err {
        BridgeError::BackendRejected { status, .. } => i64::from(*status),
        _ => 0,
    };
    SendError {
        message: format!("Unable to forward {} request: {}", action.action, err),
        kind: String::new(),
        code,
    }
}
