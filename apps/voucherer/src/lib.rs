//! # Voucherer
//!
//! Local web server for issuing and redeeming single-use vouchers.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Voucherer Server                               │
//! │                                                                         │
//! │  Browser ───► HTTP (localhost:8080) ───► routes ───► voucher-db        │
//! │                                            │             │              │
//! │                                            ▼             ▼              │
//! │                                     pages / barcode   database.sqlite   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! `config.yaml` in the working directory (created with defaults on first
//! start), overridden by `--port` and `--no-browser`. See [`config`].

pub mod barcode;
pub mod browser;
pub mod config;
pub mod error;
pub mod forms;
pub mod logging;
pub mod pages;
pub mod routes;
pub mod state;

// Re-exports
pub use config::{Overrides, Settings};
pub use error::{AppError, AppResult};
pub use routes::router;
pub use state::AppState;
