use crate::domain::SendAction;
use crate::store::{BookmarkPatch, NewBookmark};

/// What a single legacy action asks the store to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Insert(NewBookmark),
    Patch { id: String, patch: BookmarkPatch },
    /// Unknown verbs succeed without touching the store.
    Ignore,
}

/// Map a legacy action verb to the store update it stands for.
pub fn dispatch(action: &SendAction) -> Mutation {
    let patch = match action.action.as_str() {
        "add" => {
            return Mutation::Insert(NewBookmark {
                url: action.url.clone(),
                title: action.title.clone(),
            })
        }
        "archive" => BookmarkPatch {
            is_archived: Some(true),
            ..Default::default()
        },
        "readd" | "unarchive" => BookmarkPatch {
            is_archived: Some(false),
            ..Default::default()
        },
        "favorite" => BookmarkPatch {
            is_marked: Some(true),
            ..Default::default()
        },
        "unfavorite" => BookmarkPatch {
            is_marked: Some(false),
            ..Default::default()
        },
        "delete" => BookmarkPatch {
            is_deleted: Some(true),
            ..Default::default()
        },
        _ => return Mutation::Ignore,
    };

    Mutation::Patch {
        id: action.item_id.clone(),
        patch,
    }
}
