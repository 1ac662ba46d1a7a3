use chrono::{TimeZone, Utc};

use crate::domain::GetRequest;
use crate::store::{ContentKind, ListQuery, SortOrder};

/// Map a legacy list request onto store query parameters.
///
/// Never fails: unrecognised values fall back to the protocol defaults
/// (every state, newest first, articles only).
pub fn translate_query(req: &GetRequest) -> ListQuery {
    ListQuery {
        limit: req.count.map(clamp_non_negative),
        offset: req.offset.map(clamp_non_negative),
        updated_since: req.since.and_then(|s| Utc.timestamp_opt(s, 0).single()),
        is_archived: archived_filter(&req.state),
        is_marked: marked_filter(&req.favorite),
        sort: sort_order(&req.sort),
        kind: Some(content_kind(&req.content_type)),
    }
}

fn clamp_non_negative(value: i64) -> u64 {
    value.max(0) as u64
}

fn archived_filter(state: &str) -> Option<bool> {
    match state.to_lowercase().as_str() {
        "unread" => Some(false),
        "archive" => Some(true),
        // "all" and anything unknown
        _ => None,
    }
}

fn marked_filter(favorite: &str) -> Option<bool> {
    match favorite {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}

fn sort_order(sort: &str) -> SortOrder {
    match sort.to_lowercase().as_str() {
        "oldest" => SortOrder::CreatedAsc,
        "title" => SortOrder::Title,
        "site" => SortOrder::Domain,
        _ => SortOrder::CreatedDesc,
    }
}

fn content_kind(content_type: &str) -> ContentKind {
    match content_type.to_lowercase().as_str() {
        "video" => ContentKind::Video,
        "image" => ContentKind::Photo,
        _ => ContentKind::Article,
    }
}
