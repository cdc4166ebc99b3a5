//! # voucher-db: Voucher Store
//!
//! This crate provides durable storage for vouchers.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Voucherer Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (POST /redeem)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    voucher-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository    │    │   Schema     │  │   │
//! │  │   │   (pool.rs)   │    │  (voucher.rs)  │    │ (schema.rs)  │  │   │
//! │  │   │               │    │                │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ list_all       │    │ CREATE TABLE │  │   │
//! │  │   │ WAL, busy     │    │ create, redeem │    │ IF NOT EXISTS│  │   │
//! │  │   │ timeout       │    │ delete         │    │              │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  database.sqlite (one table: vouchers)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pool`] - Connection pool and database handle
//! - [`schema`] - Idempotent table creation
//! - [`error`] - Store error types
//! - [`repository`] - Voucher operations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use voucher_db::{Database, DbConfig};
//! use voucher_core::VoucherCode;
//!
//! let db = Database::new(DbConfig::new("database.sqlite")).await?;
//!
//! let code = VoucherCode::generate();
//! db.vouchers().create(code.as_str()).await?;
//! let outcome = db.vouchers().redeem(code.as_str()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pool;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::voucher::VoucherRepository;
