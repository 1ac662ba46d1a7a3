use std::path::Path;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::app::{AppContext, Result};
use crate::cli::{GetArgs, LoginArgs, SendArgs};
use crate::domain::{GetRequest, SendAction, SendRequest};
use crate::store::{request_token, BackendConfig, Credentials};

pub async fn login(backend: &BackendConfig, args: LoginArgs) -> Result<()> {
    let credentials = Credentials {
        application: args.application,
        username: args.username,
        password: args.password,
    };
    let token = request_token(backend, &credentials).await?;
    tracing::info!("Received token for {}", credentials.username);
    println!("{}", token);
    Ok(())
}

pub async fn get(ctx: &AppContext, args: GetArgs) -> Result<()> {
    let request = get_request(args)?;
    let response = ctx.translator.get(&request).await?;
    print_json(&response)
}

pub async fn send(ctx: &AppContext, args: SendArgs) -> Result<()> {
    let request = send_request(args)?;
    let response = ctx.translator.send(&request).await;
    print_json(&response)
}

/// Every invocation is a fresh process, so the cache is filled from the
/// store before looking the URL up.
pub async fn text(ctx: &AppContext, url: &str) -> Result<()> {
    if ctx.translator.cache().lookup(url).is_none() {
        ctx.translator
            .refresh_cache(ctx.config.cache.page_size)
            .await?;
    }
    let response = ctx.translator.article_text(url).await?;
    print_json(&response)
}

pub fn get_request(args: GetArgs) -> Result<GetRequest> {
    if let Some(path) = args.request {
        return read_json(&path);
    }
    Ok(GetRequest {
        state: args.state.unwrap_or_default(),
        favorite: args.favorite.unwrap_or_default(),
        sort: args.sort.unwrap_or_default(),
        content_type: args.content_type.unwrap_or_default(),
        count: args.count,
        offset: args.offset,
        since: args.since,
        ..Default::default()
    })
}

pub fn send_request(args: SendArgs) -> Result<SendRequest> {
    if let Some(path) = args.batch {
        return read_json(&path);
    }
    let action = SendAction {
        action: args.action.unwrap_or_default(),
        item_id: args.item_id.unwrap_or_default(),
        time: Utc::now().timestamp(),
        url: args.url.unwrap_or_default(),
        title: args.title.unwrap_or_default(),
    };
    Ok(SendRequest {
        actions: vec![action],
        ..Default::default()
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
