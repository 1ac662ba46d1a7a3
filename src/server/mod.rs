//! HTTP listener answering legacy clients.
//!
//! - `/v3/get`: JSON list request
//! - `/v3/send`: JSON action batch
//! - `/v3beta/text`: form-encoded `url`, answered with the article text
//!
//! Anything else is a 404. Undecodable bodies and translation failures are
//! answered with 400 and a plain-text reason.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::FormRejection;
use axum::extract::{Request, State};
use axum::http::{StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Form, Json, Router};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::app::{AppContext, Result};
use crate::domain::{GetRequest, SendRequest};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TextRequest {
    url: String,
}

pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/v3/get", any(get_articles))
        .route("/v3/send", any(modify_articles))
        .route("/v3beta/text", any(article_text))
        .fallback(catch_all)
        .layer(middleware::from_fn(log_request))
        .with_state(ctx)
}

/// Bind `server.host:server.port` and serve until the process exits.
pub async fn serve(ctx: Arc<AppContext>) -> Result<()> {
    let listener = {
        let server = &ctx.config.server;
        tokio::net::TcpListener::bind((server.host.as_str(), server.port)).await?
    };
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(ctx)).await?;
    Ok(())
}

async fn get_articles(State(ctx): State<Arc<AppContext>>, body: Bytes) -> Response {
    let req: GetRequest = match decode(&body) {
        Ok(req) => req,
        Err(response) => return response,
    };
    tracing::debug!("/v3/get: {:?}", req);

    match ctx.translator.get(&req).await {
        Ok(res) => Json(res).into_response(),
        Err(e) => bad_request(format!("Unable to forward request: {}", e)),
    }
}

async fn modify_articles(State(ctx): State<Arc<AppContext>>, body: Bytes) -> Response {
    let req: SendRequest = match decode(&body) {
        Ok(req) => req,
        Err(response) => return response,
    };
    tracing::debug!("/v3/send: {:?}", req);

    Json(ctx.translator.send(&req).await).into_response()
}

async fn article_text(
    State(ctx): State<Arc<AppContext>>,
    form: std::result::Result<Form<TextRequest>, FormRejection>,
) -> Response {
    let Form(req) = match form {
        Ok(form) => form,
        Err(e) => return bad_request(format!("Unable to parse request body: {}", e.body_text())),
    };
    if req.url.is_empty() {
        return bad_request("No URL specified in form data".to_string());
    }
    tracing::debug!("/v3beta/text: {}", req.url);

    match ctx.translator.article_text(&req.url).await {
        Ok(res) => Json(res).into_response(),
        Err(e) => bad_request(format!("Unable to forward request: {}", e)),
    }
}

async fn catch_all(uri: Uri) -> Response {
    tracing::warn!("Got unhandled request at {}", uri);
    (StatusCode::NOT_FOUND, "404 page not found").into_response()
}

async fn log_request(req: Request, next: Next) -> Response {
    tracing::info!("{} {} received", req.method(), req.uri());
    for (name, value) in req.headers() {
        tracing::debug!("{}: {:?}", name, value);
    }
    next.run(req).await
}

/// Legacy clients do not always label their JSON, so the body is decoded
/// whatever its content type.
fn decode<T: DeserializeOwned>(body: &[u8]) -> std::result::Result<T, Response> {
    serde_json::from_slice(body)
        .map_err(|e| bad_request(format!("Unable to parse request body: {}", e)))
}

fn bad_request(message: String) -> Response {
    tracing::warn!("{}", message);
    (StatusCode::BAD_REQUEST, message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::body::Body;
    use axum::http::{Method, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::store::memory::{bookmark, Call, MemoryStore};

    fn app(store: MemoryStore) -> (Arc<MemoryStore>, Router) {
        let store = Arc::new(store);
        let ctx = AppContext::with_store(Config::default(), store.clone());
        (store, router(Arc::new(ctx)))
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8_lossy(&bytes).to_string()
    }

    async fn body_json(resp: Response) -> Value {
        serde_json::from_str(&body_text(resp).await).unwrap()
    }

    #[tokio::test]
    async fn test_get_returns_legacy_list() {
        let (_store, app) = app(MemoryStore {
            bookmarks: vec![bookmark("a"), bookmark("b")],
            total: 2,
            ..Default::default()
        });

        let resp = app
            .oneshot(json_request(
                "/v3/get",
                json!({"consumer_key": "k", "access_token": "t", "state": "unread", "count": 10}),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["status"], 1);
        assert_eq!(body["total"], 2);
        assert_eq!(body["list"]["a"]["given_url"], "https://example.com/a");
        assert_eq!(body["list"]["b"]["status"], "0");
    }

    #[tokio::test]
    async fn test_get_accepts_unlabelled_json() {
        let (_store, app) = app(MemoryStore::default());
        let req = Request::builder()
            .method(Method::POST)
            .uri("/v3/get")
            .body(Body::from("{}"))
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_rejects_bad_body() {
        let (store, app) = app(MemoryStore::default());

        let req = Request::builder()
            .method(Method::POST)
            .uri("/v3/get")
            .body(Body::from("not json"))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(resp)
            .await
            .starts_with("Unable to parse request body"));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_send_reports_each_action() {
        let (store, app) = app(MemoryStore {
            rejected_ids: vec!["gone".into()],
            ..Default::default()
        });

        let resp = app
            .oneshot(json_request(
                "/v3/send",
                json!({"actions": [
                    {"action": "archive", "item_id": "a", "time": 1700000000},
                    {"action": "delete", "item_id": "gone", "time": 1700000000},
                    {"action": "frobnicate", "item_id": "a"}
                ]}),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["status"], 0);
        assert_eq!(body["action_results"], json!([true, false, true]));
        assert!(body["action_errors"][0].is_null());
        assert_eq!(body["action_errors"][1]["code"], 404);
        assert!(body["action_errors"][2].is_null());
        assert_eq!(store.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_text_after_listing() {
        let mut articles = HashMap::new();
        articles.insert(
            "a".to_string(),
            r#"<html><body><p>Hello</p><img src="https://example.com/p.png"></body></html>"#
                .to_string(),
        );
        let (store, app) = app(MemoryStore {
            bookmarks: vec![bookmark("a")],
            articles,
            ..Default::default()
        });

        let resp = app
            .clone()
            .oneshot(json_request("/v3/get", json!({})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .oneshot(form_request(
                "/v3beta/text",
                "consumer_key=k&url=https%3A%2F%2Fexample.com%2Fa&access_token=t",
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["item_id"], "a");
        assert_eq!(body["article"], "<div><p>Hello</p><!--IMG_1--></div>");
        assert_eq!(body["images"]["1"]["src"], "https://example.com/p.png");
        assert!(store.calls().contains(&Call::FetchArticle("a".into())));
    }

    #[tokio::test]
    async fn test_text_unknown_url_is_bad_request() {
        let (store, app) = app(MemoryStore::default());

        let resp = app
            .oneshot(form_request("/v3beta/text", "url=https%3A%2F%2Fnever.seen%2F"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let text = body_text(resp).await;
        assert!(text.starts_with("Unable to forward request"));
        assert!(text.contains("https://never.seen/"));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_text_without_url() {
        let (_store, app) = app(MemoryStore::default());

        let resp = app
            .oneshot(form_request("/v3beta/text", "consumer_key=k"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(resp).await, "No URL specified in form data");
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let (_store, app) = app(MemoryStore::default());

        let resp = app
            .oneshot(json_request("/v3/oauth/request", json!({})))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
