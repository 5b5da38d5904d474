#![forbid(unsafe_code)]

//! `chat-queue` — support chat queue server binary.
//!
//! Loads configuration, starts the background tick task and the HTTP
//! transport, and shuts both down on ctrl-c / SIGTERM.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use chat_queue::engine::ticker::{spawn_tick_task, TickTrigger};
use chat_queue::http::server::serve_http;
use chat_queue::logging::{init_tracing, LogFormat};
use chat_queue::{AppError, GlobalConfig, QueueEngine, Result};

#[derive(Debug, Parser)]
#[command(name = "chat-queue", about = "Support chat queue server", version, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Built-in defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Override the configured HTTP port.
    #[arg(long)]
    port: Option<u16>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;
    info!("chat-queue server bootstrap");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    // ── Load configuration ──────────────────────────────
    let mut config = match args.config {
        Some(ref path) => GlobalConfig::load_from_path(path)?,
        None => GlobalConfig::default(),
    };
    if let Some(port) = args.port {
        config.http_port = port;
    }
    info!(
        agents = config.agents.len(),
        overflow_agents = config.overflow_agents.len(),
        shift = config.initial_shift,
        "configuration loaded"
    );

    let engine = Arc::new(QueueEngine::from_config(&config));
    let ct = CancellationToken::new();

    // ── Start tick task ─────────────────────────────────
    let tick_handle = spawn_tick_task(
        Arc::clone(&engine),
        TickTrigger::Interval(config.tick_interval()),
        ct.clone(),
    );
    info!(interval_ms = config.tick_interval_ms, "tick task started");

    // ── Start HTTP transport ────────────────────────────
    let http_ct = ct.clone();
    let http_engine = Arc::clone(&engine);
    let http_config = config.clone();
    let http_handle = tokio::spawn(async move {
        if let Err(err) = serve_http(http_engine, &http_config, http_ct.clone()).await {
            error!(%err, "http transport failed");
            http_ct.cancel();
        }
    });

    // ── Wait for shutdown ───────────────────────────────
    tokio::select! {
        () = shutdown_signal() => info!("shutdown signal received"),
        () = ct.cancelled() => info!("transport stopped, shutting down"),
    }
    ct.cancel();

    let _ = tokio::join!(tick_handle, http_handle);
    info!("chat-queue shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(err) => {
                tracing::warn!(%err, "failed to register SIGTERM handler, using ctrl-c only");
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = ctrl_c.await {
            tracing::error!(%err, "ctrl-c signal handler failed");
        }
    }
}
