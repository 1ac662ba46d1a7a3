use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pocketbridge::app::AppContext;
use pocketbridge::cli::{commands, Cli, Commands};
use pocketbridge::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_config_path()?,
    };

    if let Commands::ConfigPath = cli.command {
        println!("{}", config_path.display());
        return Ok(());
    }

    let mut config = Config::load_from(&config_path)?;
    if let Some(endpoint) = cli.endpoint {
        config.backend.endpoint = endpoint;
    }
    if let Some(token) = cli.token {
        config.backend.bearer_token = token;
    }

    if let Commands::Login(args) = cli.command {
        commands::login(&config.backend, args).await?;
        return Ok(());
    }
    if let Commands::Serve { port: Some(port) } = cli.command {
        config.server.port = port;
    }

    let ctx = AppContext::new(config)?;
    ctx.warm_cache_if_configured().await?;

    match cli.command {
        Commands::Serve { .. } => {
            pocketbridge::server::serve(Arc::new(ctx)).await?;
        }
        Commands::Get(args) => {
            commands::get(&ctx, args).await?;
        }
        Commands::Send(args) => {
            commands::send(&ctx, args).await?;
        }
        Commands::Text { url } => {
            commands::text(&ctx, &url).await?;
        }
        Commands::Login(_) | Commands::ConfigPath => {}
    }

    Ok(())
}
