//! Rewrites a store-supplied article body into the legacy encoding.
//!
//! The legacy protocol sends the article as a fragment rooted in a `<div>`
//! and replaces every image with a `<!--IMG_n-->` comment whose `n` keys
//! into a separate image table.

use std::collections::BTreeMap;

use scraper::node::Comment;
use scraper::{Html, Node};

use crate::app::{BridgeError, Result};
use crate::domain::Image;

/// Output of [`rewrite_article`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewrittenArticle {
    pub body: String,
    /// Keyed by position ("1", "2", ...) in document order.
    pub images: BTreeMap<String, Image>,
    /// Byte length of `body`.
    pub content_length: usize,
}

struct FoundImage<Id> {
    node: Id,
    src: String,
    width: String,
    height: String,
}

/// Parse `html` like a browser would, turn its `<body>` into a `<div>` and
/// swap every `<img>` with a source for a placeholder comment.
///
/// Images without a `src` are left in place and get no position.
pub fn rewrite_article(html: &str, item_id: &str) -> Result<RewrittenArticle> {
    let mut document = Html::parse_document(html);

    let body_id = document
        .tree
        .root()
        .descendants()
        .find(|node| matches!(node.value(), Node::Element(el) if el.name() == "body"))
        .map(|node| node.id())
        .ok_or_else(|| BridgeError::ParseFailure("document has no body".into()))?;

    let found: Vec<_> = document
        .tree
        .get(body_id)
        .into_iter()
        .flat_map(|body| body.descendants())
        .filter_map(|node| match node.value() {
            Node::Element(el) if el.name() == "img" => {
                let src = el.attr("src").unwrap_or_default();
                if src.is_empty() {
                    return None;
                }
                Some(FoundImage {
                    node: node.id(),
                    src: src.to_string(),
                    width: el.attr("width").unwrap_or_default().to_string(),
                    height: el.attr("height").unwrap_or_default().to_string(),
                })
            }
            _ => None,
        })
        .collect();

    let mut images = BTreeMap::new();
    for (index, image) in found.into_iter().enumerate() {
        let position = (index + 1).to_string();

        if let Some(mut node) = document.tree.get_mut(image.node) {
            *node.value() = Node::Comment(Comment {
                comment: format!("IMG_{}", position).as_str().into(),
            });
        }

        images.insert(
            position.clone(),
            Image {
                item_id: item_id.to_string(),
                image_id: position,
                src: image.src,
                width: image.width,
                height: image.height,
                ..Default::default()
            },
        );
    }

    if let Some(mut body) = document.tree.get_mut(body_id) {
        if let Node::Element(el) = body.value() {
            el.name.local = "div".into();
        }
    }

    let body = document
        .tree
        .get(body_id)
        .and_then(scraper::ElementRef::wrap)
        .map(|el| el.html())
        .ok_or_else(|| BridgeError::ParseFailure("rewritten body is not an element".into()))?;

    tracing::debug!(
        "Rewrote article {} with {} images ({} bytes)",
        item_id,
        images.len(),
        body.len()
    );

    Ok(RewrittenArticle {
        content_length: body.len(),
        body,
        images,
    })
}
