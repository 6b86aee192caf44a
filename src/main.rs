//! Browser Embassy - remote browser automation service.
//!
//! Main entry point: parses the CLI surface, initializes tracing, pre-starts
//! the browser session, and serves the HTTP facade.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use embassy_api::{AppState, Server, ServerConfig};
use embassy_browser::{BrowserConfig, SessionHolder};

/// Browser Embassy CLI.
#[derive(Parser)]
#[command(name = "browser-embassy")]
#[command(about = "Remote browser automation service")]
#[command(version)]
struct Cli {
    /// Listen host
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Listen port
    #[arg(long, env = "PORT", default_value_t = 7860)]
    port: u16,

    /// Chromium remote-debugging port
    #[arg(long, default_value_t = 9222)]
    debug_port: u16,

    /// Run the browser with a visible window
    #[arg(long)]
    headed: bool,

    /// Browser profile directory
    #[arg(long)]
    profile_dir: Option<PathBuf>,

    /// Skip the eager browser start; the session is created on first use
    #[arg(long)]
    lazy: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let browser_config = BrowserConfig {
        debug_port: cli.debug_port,
        headless: !cli.headed,
        profile_dir: cli.profile_dir.clone(),
        ..Default::default()
    };

    let sessions = Arc::new(SessionHolder::new(browser_config));

    if !cli.lazy {
        match sessions.ensure().await {
            Ok(_) => info!("Browser session pre-started"),
            Err(e) => warn!(
                "Browser pre-start failed ({}); it will be retried on first use",
                e
            ),
        }
    }

    let state = Arc::new(AppState::new(sessions));
    let server = Server::new(ServerConfig::new(cli.host, cli.port), state);

    server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("server error: {}", e))?;

    Ok(())
}
