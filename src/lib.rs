//! # Pocketbridge
//!
//! Answers legacy read-it-later (Pocket v3) requests from a self-hosted
//! bookmark store.
//!
//! ## Architecture
//!
//! ```text
//! legacy request → server → translate → BookmarkStore → translate → legacy response
//! ```
//!
//! - [`server`]: axum listener for `/v3/get`, `/v3/send` and `/v3beta/text`
//! - [`translate`]: query, record, article and mutation translation plus the URL cache
//! - [`store`]: bookmark store abstraction and the Readeck REST connector
//!
//! ## Quick Start
//!
//! ```bash
//! # Get an API token from the store
//! pocketbridge --endpoint http://localhost:8000 login --username ada --password secret
//!
//! # Serve legacy clients on port 8080
//! pocketbridge --endpoint http://localhost:8000 --token <token> serve
//!
//! # List unread items
//! pocketbridge get --state unread --count 10
//!
//! # Archive an item
//! pocketbridge send archive --item-id 3Jd8XqbR2sYk
//!
//! # Fetch article text for a saved URL
//! pocketbridge text https://example.com/post
//! ```
//!
//! ## Modules
//!
//! - [`app`]: Application context and error types
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: Config file loading
//! - [`domain`]: Store records, legacy wire shapes and the digest helper
//! - [`server`]: Legacy HTTP API
//! - [`store`]: Bookmark store connectors
//! - [`translate`]: The translation engine

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct picks the store connector
/// from config and wraps it in a [`Translator`](translate::Translator).
pub mod app;

/// Command-line interface using clap.
///
/// - `serve [--port]` - Answer legacy clients over HTTP
/// - `login --username` - Request a store API token
/// - `get` - Print a legacy list response
/// - `send <action>` - Apply legacy actions
/// - `text <url>` - Print the legacy article text response
/// - `config-path` - Show where the config file lives
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/pocketbridge/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Bookmark`](domain::Bookmark): Store-side bookmark record
/// - [`ListItem`](domain::ListItem) and friends: legacy protocol shapes
/// - [`digest`](domain::digest): Stable hex identifiers for derived entities
pub mod domain;

/// Legacy HTTP API built on axum.
pub mod server;

/// Bookmark store access.
///
/// - [`BookmarkStore`](store::BookmarkStore): Async trait over store operations
/// - [`ReadeckStore`](store::ReadeckStore): reqwest-based Readeck connector
/// - [`request_token`](store::request_token): username/password login
pub mod store;

/// Translation between the legacy protocol and the store.
pub mod translate;
