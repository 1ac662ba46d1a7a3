use async_trait::async_trait;
use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::app::{BridgeError, Result};
use crate::domain::{Bookmark, BookmarkPage};
use crate::store::{BackendConfig, BookmarkPatch, BookmarkStore, ListQuery, NewBookmark};

const TOTAL_COUNT_HEADER: &str = "Total-Count";
const BOOKMARK_ID_HEADER: &str = "Bookmark-Id";

/// Connector for a Readeck server's REST API.
pub struct ReadeckStore {
    client: Client,
    api_base: Url,
    bearer_token: String,
}

impl ReadeckStore {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        require_endpoint(config)?;
        if config.bearer_token.is_empty() {
            return Err(BridgeError::Config(
                "a bearer token is required for the readeck backend".into(),
            ));
        }

        Ok(Self {
            client: build_client(config)?,
            api_base: api_base(&config.endpoint)?,
            bearer_token: config.bearer_token.clone(),
        })
    }

    fn api_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| BridgeError::Config(format!("{} cannot be a base URL", self.api_base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.bearer_auth(&self.bearer_token).send().await?;
        check_response(response).await
    }
}

#[async_trait]
impl BookmarkStore for ReadeckStore {
    async fn list(&self, query: &ListQuery) -> Result<BookmarkPage> {
        let url = self.api_url(&["bookmarks"])?;
        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .send(self.client.get(url).query(&query.to_params()))
            .await?;
        let total = total_count(response.headers());
        let bookmarks = decode_page(&response.bytes().await?)?;

        Ok(BookmarkPage { bookmarks, total })
    }

    async fn fetch_one(&self, id: &str) -> Result<Bookmark> {
        let url = self.api_url(&["bookmarks", id])?;
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(url)).await?;
        Ok(serde_json::from_slice(&response.bytes().await?)?)
    }

    async fn fetch_article(&self, id: &str) -> Result<String> {
        let url = self.api_url(&["bookmarks", id, "article"])?;
        tracing::debug!("GET {}", url);

        let response = self
            .send(self.client.get(url).header(ACCEPT, "text/html"))
            .await?;
        Ok(response.text().await?)
    }

    async fn insert(&self, bookmark: &NewBookmark) -> Result<Option<String>> {
        let url = self.api_url(&["bookmarks"])?;
        tracing::debug!("POST {} {}", url, bookmark.url);

        let response = self.send(self.client.post(url).json(bookmark)).await?;
        Ok(header_value(response.headers(), BOOKMARK_ID_HEADER))
    }

    async fn patch(&self, id: &str, patch: &BookmarkPatch) -> Result<()> {
        let url = self.api_url(&["bookmarks", id])?;
        tracing::debug!("PATCH {} {:?}", url, patch);

        self.send(self.client.patch(url).json(patch)).await?;
        Ok(())
    }
}

/// Body of `POST <endpoint>/api/auth`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub application: String,
    pub username: String,
    pub password: String,
}

/// Exchange a username and password for an API token.
pub async fn request_token(config: &BackendConfig, credentials: &Credentials) -> Result<String> {
    require_endpoint(config)?;
    let client = build_client(config)?;
    let url = api_base(&config.endpoint)?.join("auth")?;
    tracing::debug!("POST {} as {}", url, credentials.username);

    let response = client
        .post(url)
        .header(ACCEPT, "application/json")
        .json(credentials)
        .send()
        .await?;
    let response = check_response(response).await?;
    parse_token(&response.bytes().await?)
}

fn require_endpoint(config: &BackendConfig) -> Result<()> {
    if config.endpoint.is_empty() {
        return Err(BridgeError::Config(
            "an endpoint is required for the readeck backend".into(),
        ));
    }
    Ok(())
}

fn build_client(config: &BackendConfig) -> Result<Client> {
    Ok(Client::builder()
        .timeout(config.timeout())
        .gzip(true)
        .brotli(true)
        .user_agent(config.user_agent.clone())
        .build()?)
}

/// `<endpoint>/api/`, keeping any path prefix the endpoint carries.
fn api_base(endpoint: &str) -> Result<Url> {
    let mut base = Url::parse(endpoint)?;
    if base.cannot_be_a_base() {
        return Err(BridgeError::Config(format!(
            "{} cannot be used as a backend endpoint",
            endpoint
        )));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join("api/")?)
}

/// Decode a listing body record by record. A record that does not fit the
/// bookmark shape is logged and dropped so the rest of the page survives.
fn decode_page(body: &[u8]) -> Result<Vec<Bookmark>> {
    let records: Vec<serde_json::Value> = serde_json::from_slice(body)?;
    let bookmarks = records
        .into_iter()
        .enumerate()
        .filter_map(|(position, record)| match serde_json::from_value(record) {
            Ok(bookmark) => Some(bookmark),
            Err(e) => {
                tracing::warn!("Skipping malformed bookmark at position {}: {}", position, e);
                None
            }
        })
        .collect();
    Ok(bookmarks)
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    #[serde(default)]
    token: String,
}

fn parse_token(body: &[u8]) -> Result<String> {
    let body: TokenBody = serde_json::from_slice(body)?;
    if body.token.is_empty() {
        return Err(BridgeError::AuthFailed(
            "store returned an empty token".into(),
        ));
    }
    Ok(body.token)
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn total_count(headers: &HeaderMap) -> u64 {
    header_value(headers, TOTAL_COUNT_HEADER)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(rejection(status, &body))
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    status: i64,
    #[serde(default)]
    message: String,
}

/// Fold the HTTP status and the store's error body into a single error.
fn rejection(status: StatusCode, body: &str) -> BridgeError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(details) if !details.message.is_empty() => format!(
            "{}, more details: [{}] {}",
            status, details.status, details.message
        ),
        _ => status.to_string(),
    };
    BridgeError::BackendRejected {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn store(endpoint: &str) -> ReadeckStore {
        let config = BackendConfig {
            endpoint: endpoint.into(),
            bearer_token: "token".into(),
            ..Default::default()
        };
        ReadeckStore::new(&config).unwrap()
    }

    #[test]
    fn test_api_url_from_bare_host() {
        let store = store("http://localhost:8000");
        assert_eq!(
            store.api_url(&["bookmarks"]).unwrap().as_str(),
            "http://localhost:8000/api/bookmarks"
        );
    }

    #[test]
    fn test_api_url_keeps_path_prefix() {
        let store = store("https://example.com/readeck");
        assert_eq!(
            store.api_url(&["bookmarks", "abc", "article"]).unwrap().as_str(),
            "https://example.com/readeck/api/bookmarks/abc/article"
        );
    }

    #[test]
    fn test_api_url_escapes_identifier() {
        let store = store("http://localhost:8000/");
        assert_eq!(
            store.api_url(&["bookmarks", "a/b?c"]).unwrap().as_str(),
            "http://localhost:8000/api/bookmarks/a%2Fb%3Fc"
        );
    }

    #[test]
    fn test_new_requires_endpoint_and_token() {
        let missing_endpoint = BackendConfig {
            bearer_token: "token".into(),
            ..Default::default()
        };
        assert!(matches!(
            ReadeckStore::new(&missing_endpoint),
            Err(BridgeError::Config(_))
        ));

        let missing_token = BackendConfig {
            endpoint: "http://localhost:8000".into(),
            ..Default::default()
        };
        assert!(matches!(
            ReadeckStore::new(&missing_token),
            Err(BridgeError::Config(_))
        ));
    }

    #[test]
    fn test_new_rejects_invalid_endpoint() {
        let config = BackendConfig {
            endpoint: "not a url".into(),
            bearer_token: "token".into(),
            ..Default::default()
        };
        assert!(matches!(
            ReadeckStore::new(&config),
            Err(BridgeError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_total_count_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(total_count(&headers), 0);

        headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from_static("42"));
        assert_eq!(total_count(&headers), 42);

        headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from_static("many"));
        assert_eq!(total_count(&headers), 0);
    }

    #[test]
    fn test_bookmark_id_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(header_value(&headers, BOOKMARK_ID_HEADER), None);

        headers.insert(BOOKMARK_ID_HEADER, HeaderValue::from_static("xyz"));
        assert_eq!(
            header_value(&headers, BOOKMARK_ID_HEADER),
            Some("xyz".to_string())
        );
    }

    #[test]
    fn test_rejection_folds_error_body() {
        let err = rejection(
            StatusCode::FORBIDDEN,
            r#"{"status": 403, "message": "Invalid token"}"#,
        );
        match err {
            BridgeError::BackendRejected { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "403 Forbidden, more details: [403] Invalid token");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rejection_without_json_body() {
        let err = rejection(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        match err {
            BridgeError::BackendRejected { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "502 Bad Gateway");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_decode_page_skips_malformed_records() {
        let body = br#"[
            {"id": "a", "url": "https://example.com/a", "reading_time": 3},
            {"id": "b", "url": "https://example.com/b", "title": {"nested": true}},
            {"id": "c", "url": "https://example.com/c", "reading_time": 4.5, "authors": ["Ada", null]}
        ]"#;

        let bookmarks = decode_page(body).unwrap();

        let ids: Vec<_> = bookmarks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(bookmarks[1].reading_time, Some(4));
        assert_eq!(bookmarks[1].authors, vec!["Ada".to_string()]);
    }

    #[test]
    fn test_decode_page_rejects_non_array_body() {
        assert!(matches!(
            decode_page(b"<html>login</html>"),
            Err(BridgeError::Json(_))
        ));
        assert!(matches!(
            decode_page(br#"{"id": "a"}"#),
            Err(BridgeError::Json(_))
        ));
    }

    #[test]
    fn test_decode_empty_page() {
        assert!(decode_page(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_token() {
        assert_eq!(
            parse_token(br#"{"id": "x1", "token": "abc123"}"#).unwrap(),
            "abc123"
        );
        assert!(matches!(
            parse_token(br#"{"id": "x1"}"#),
            Err(BridgeError::AuthFailed(_))
        ));
        assert!(matches!(parse_token(b"nope"), Err(BridgeError::Json(_))));
    }

    #[tokio::test]
    async fn test_request_token_requires_endpoint() {
        let credentials = Credentials {
            application: "pocketbridge".into(),
            username: "ada".into(),
            password: "secret".into(),
        };
        assert!(matches!(
            request_token(&BackendConfig::default(), &credentials).await,
            Err(BridgeError::Config(_))
        ));
    }
}
