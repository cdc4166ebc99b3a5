//! Tracing setup: stdout plus a log file next to the database.

use std::fs::File;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "info,voucherer=debug,voucherer_lib=debug,sqlx=warn";

/// Initializes the global subscriber.
///
/// The log file is created (truncated) up front so a failure surfaces as
/// an error before anything else starts. The returned guard flushes the
/// file writer on drop and must be held for the lifetime of the process.
pub fn init(log_path: &Path) -> io::Result<WorkerGuard> {
    let file = File::create(log_path)?;
    let (file_writer, guard) = tracing_appender::non_blocking(file);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}
