mod action;
mod app;
mod app_state;
mod component;
mod components;
mod flows;
mod form;
mod notifier;
mod theme;
mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use shark_proto::config::Config;
use shark_proto::endpoints::Endpoints;

/// Terminal control panel for an rsharkd RadioShark transmitter.
#[derive(Debug, Parser)]
#[command(name = "sharkpanel", version)]
struct Args {
    /// Daemon origin, e.g. http://shark:8080 (overrides the config file)
    #[arg(long)]
    daemon: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let data_dir = shark_proto::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("panel.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but suppress noisy
    // connection-level DEBUG from HTTP client internals (hyper_util, reqwest).
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("sharkpanel log: {}", log_path.display());
    tracing::info!("sharkpanel starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let loaded = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("config unreadable, using defaults: {}", e);
        Config::default()
    });

    let daemon_url = args.daemon.unwrap_or(config.daemon.url);
    let endpoints = Endpoints::from_daemon_url(&daemon_url)?;
    tracing::info!(
        "daemon {} / stream status {}",
        daemon_url,
        endpoints.stream_status
    );

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(
        daemon_url,
        endpoints,
        Duration::from_millis(config.ui.tick_ms.max(10)),
    );
    app.run().await?;

    Ok(())
}
