//! # voucher-core: Pure Voucher Types
//!
//! This crate holds the domain types shared by the store and the web app.
//! It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Voucherer Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser (HTML forms)                         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/voucherer (axum)                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ voucher-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌──────────────┐  ┌───────────────┐           │   │
//! │  │   │   types   │  │     code     │  │     error     │           │   │
//! │  │   │  Voucher  │  │ VoucherCode  │  │   CoreError   │           │   │
//! │  │   │  Outcome  │  │  generation  │  │               │           │   │
//! │  │   └───────────┘  └──────────────┘  └───────────────┘           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    voucher-db (SQLite store)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use voucher_core::{Voucher, VoucherCode, VoucherState};
//!
//! let code = VoucherCode::generate();
//! assert_eq!(code.as_str().len(), 20);
//!
//! let voucher = Voucher::new(code.as_str());
//! assert_eq!(voucher.state(), VoucherState::Active);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod code;
pub mod error;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use code::VoucherCode;
pub use error::{CoreError, CoreResult};
pub use types::*;

/// Application name shown in page titles and headers.
pub const APP_NAME: &str = "voucherer";
