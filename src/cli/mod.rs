pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pocketbridge")]
#[command(about = "Answer legacy read-it-later requests from a bookmark store", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/pocketbridge/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Store endpoint, overrides the config file
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Store bearer token, overrides the config file
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the legacy API over HTTP
    Serve {
        /// Port to listen on, overrides the config file
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Exchange store credentials for an API token and print it
    Login(LoginArgs),
    /// List bookmarks as a legacy list response
    Get(GetArgs),
    /// Apply legacy actions and print the send response
    Send(SendArgs),
    /// Print the legacy article text response for a URL
    Text {
        /// URL of the saved article
        url: String,
    },
    /// Print the config file location
    ConfigPath,
}

#[derive(Args, Debug, Default)]
pub struct GetArgs {
    /// Read the full list request from a JSON file instead of flags
    #[arg(long, conflicts_with_all = ["state", "favorite", "sort", "content_type", "count", "offset", "since"])]
    pub request: Option<PathBuf>,

    /// "unread", "archive" or "all"
    #[arg(long)]
    pub state: Option<String>,

    /// "0" or "1"
    #[arg(long)]
    pub favorite: Option<String>,

    /// "newest", "oldest", "title" or "site"
    #[arg(long)]
    pub sort: Option<String>,

    /// "article", "video" or "image"
    #[arg(long)]
    pub content_type: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub count: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    pub offset: Option<i64>,

    /// Only items updated after this Unix timestamp
    #[arg(long)]
    pub since: Option<i64>,
}

#[derive(Args, Debug, Default)]
pub struct SendArgs {
    /// Action verb, e.g. archive, readd, favorite, unfavorite, delete, add
    #[arg(required_unless_present = "batch")]
    pub action: Option<String>,

    /// Target item id
    #[arg(long)]
    pub item_id: Option<String>,

    /// URL for "add"
    #[arg(long)]
    pub url: Option<String>,

    /// Title for "add"
    #[arg(long)]
    pub title: Option<String>,

    /// Read the full send request from a JSON file
    #[arg(long, conflicts_with_all = ["action", "item_id", "url", "title"])]
    pub batch: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(short, long)]
    pub username: String,

    #[arg(short, long)]
    pub password: String,

    /// Application name the store shows for the token
    #[arg(long, default_value = "pocketbridge")]
    pub application: String,
}
