pub mod bookmark;
pub mod digest;
pub mod legacy;

pub use bookmark::{Bookmark, BookmarkPage, Resource};
pub use digest::digest;
pub use legacy::{
    ArticleText, Author, DomainMetadata, GetRequest, GetResponse, Image, ListItem, SendAction,
    SendError, SendRequest, SendResponse,
};
