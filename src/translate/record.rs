use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::{digest, ArticleText, Author, Bookmark, DomainMetadata, Image, ListItem};
use crate::translate::article::RewrittenArticle;
use crate::translate::cache::UrlIdCache;

/// Translate a store record into a legacy list item and remember its URL.
pub fn translate_record(bookmark: &Bookmark, cache: &UrlIdCache) -> ListItem {
    cache.record(&bookmark.url, &bookmark.id);
    to_list_item(bookmark)
}

/// Translate a store record into a legacy list item.
///
/// Never fails: every missing input has a fallback value.
pub fn to_list_item(bookmark: &Bookmark) -> ListItem {
    let time_favorited = if bookmark.is_marked {
        unix_string(bookmark.updated)
    } else {
        "0".to_string()
    };

    let image = cover_image(bookmark);
    let top_image_url = image.as_ref().map(|i| i.src.clone()).unwrap_or_default();

    ListItem {
        item_id: bookmark.id.clone(),
        favorite: flag(bookmark.is_marked),
        status: status(bookmark).to_string(),
        time_added: unix_string(bookmark.created),
        time_updated: unix_string(bookmark.updated),
        time_favorited,
        tags: Default::default(),
        top_image_url,
        resolved_id: bookmark.id.clone(),
        given_url: bookmark.url.clone(),
        given_title: bookmark.title.clone(),
        resolved_title: bookmark.title.clone(),
        resolved_url: bookmark.url.clone(),
        excerpt: bookmark.description.clone(),
        is_article: flag(bookmark.kind == "article"),
        is_index: "0".to_string(),
        has_video: "0".to_string(),
        has_image: flag(image.is_some()),
        word_count: bookmark.word_count.to_string(),
        lang: bookmark.lang.clone(),
        time_to_read: bookmark.reading_time.unwrap_or(0),
        listen_duration_estimate: 0,
        domain_metadata: domain_metadata(bookmark),
        authors: authors(bookmark),
        image,
    }
}

/// Build the article text response from the record and its rewritten body.
pub fn to_article_text(bookmark: &Bookmark, article: RewrittenArticle) -> ArticleText {
    let item = to_list_item(bookmark);

    ArticleText {
        given_url: bookmark.url.clone(),
        item_id: bookmark.id.clone(),
        normal_url: bookmark.url.clone(),
        resolved_normal_url: bookmark.url.clone(),
        date_resolved: rfc3339_string(bookmark.created),
        mime_type: "text/html".to_string(),
        content_length: article.content_length.to_string(),
        encoding: "utf-8".to_string(),
        time_to_read: item.time_to_read,
        has_image: item.has_image,
        has_video: "0".to_string(),
        resolved_id: bookmark.id.clone(),
        resolved_url: bookmark.url.clone(),
        host: bookmark.site.clone(),
        title: bookmark.title.clone(),
        date_published: rfc3339_string(bookmark.published),
        time_published: bookmark.published.map(|t| t.timestamp()).unwrap_or(0),
        response_code: "200".to_string(),
        excerpt: bookmark.description.clone(),
        authors: item.authors,
        images: article.images,
        word_count: bookmark.word_count,
        is_article: 1,
        lang: bookmark.lang.clone(),
        top_image_url: item.top_image_url,
        domain_metadata: item.domain_metadata,
        article: article.body,
        ..Default::default()
    }
}

/// "2" deleted, "1" archived, "0" otherwise. Deleted wins.
fn status(bookmark: &Bookmark) -> &'static str {
    if bookmark.is_deleted {
        "2"
    } else if bookmark.is_archived {
        "1"
    } else {
        "0"
    }
}

fn flag(value: bool) -> String {
    String::from(if value { "1" } else { "0" })
}

fn unix_string(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.timestamp()).unwrap_or(0).to_string()
}

fn rfc3339_string(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

fn domain_metadata(bookmark: &Bookmark) -> Option<DomainMetadata> {
    if bookmark.site_name.is_empty() {
        return None;
    }
    Some(DomainMetadata {
        name: bookmark.site_name.clone(),
        ..Default::default()
    })
}

fn authors(bookmark: &Bookmark) -> Option<BTreeMap<String, Author>> {
    if bookmark.authors.is_empty() {
        return None;
    }
    let authors = bookmark
        .authors
        .iter()
        .map(|name| {
            let author_id = digest(name);
            let author = Author {
                author_id: author_id.clone(),
                name: name.clone(),
                url: String::new(),
                item_id: bookmark.id.clone(),
            };
            (author_id, author)
        })
        .collect();
    Some(authors)
}

fn cover_image(bookmark: &Bookmark) -> Option<Image> {
    let resource = bookmark.cover_image()?;
    Some(Image {
        item_id: bookmark.id.clone(),
        image_id: digest(&resource.src),
        src: resource.src.clone(),
        width: resource.width.to_string(),
        height: resource.height.to_string(),
        ..Default::default()
    })
}
