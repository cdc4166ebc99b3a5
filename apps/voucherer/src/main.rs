//! # Voucherer Server
//!
//! Startup sequence:
//! ```text
//! CLI ─► Settings ─► logging ─► voucher store ─► router ─► bind
//!                                                            │
//!                            browser (optional) ◄────────────┤
//!                                                            ▼
//!                                      serve until Ctrl-C / SIGTERM ─► close
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};
use voucher_db::{Database, DbConfig};

use voucherer_lib::config::DEFAULT_CONFIG_FILE;
use voucherer_lib::{browser, logging, router, AppState, Overrides, Settings};

/// Issue and redeem single-use voucher codes from a local web page.
#[derive(Debug, Parser)]
#[command(name = "voucherer", version, about)]
struct Cli {
    /// Port to listen on (overrides the config file).
    #[arg(short, long)]
    port: Option<u16>,

    /// Config file, created with defaults if missing.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Do not open the browser after startup.
    #[arg(long)]
    no_browser: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = Overrides {
        port: cli.port,
        no_browser: cli.no_browser,
    };
    let settings = Settings::load(&cli.config, &overrides)
        .with_context(|| format!("Failed to load settings from {}", cli.config.display()))?;

    let _log_guard = logging::init(&settings.log_path)
        .with_context(|| format!("Failed to create log file {}", settings.log_path.display()))?;

    info!(
        port = settings.port,
        database = %settings.database_path.display(),
        "Starting voucherer"
    );

    let db = Database::new(DbConfig::new(&settings.database_path))
        .await
        .map_err(|err| {
            error!(%err, "Voucher store unavailable");
            err
        })
        .context("Failed to open voucher store")?;

    let state = Arc::new(AppState::new(db.clone(), settings.clone()));
    let app = router(state);

    let listener = TcpListener::bind(settings.listen_address())
        .await
        .with_context(|| format!("Failed to bind {}", settings.listen_address()))?;
    info!(addr = %listener.local_addr()?, url = %settings.url(), "Listening");

    if settings.open_browser_automatically {
        browser::open_in_browser(settings.url());
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
///
/// If a handler cannot be installed that signal is ignored rather than
/// stopping the server.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(%err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(%err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
