//! # Store Error Types
//!
//! Error types for voucher store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Categorized, never logged here                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (web app) ← Logged, mapped to 500                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Voucher store errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// The database file cannot be opened or the schema cannot be ensured.
    ///
    /// ## When This Occurs
    /// - Directory does not exist or is not writable
    /// - File is not a SQLite database
    /// - `CREATE TABLE` fails
    ///
    /// Fatal at startup.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A generated code collided with an existing voucher.
    #[error("Duplicate voucher code: '{0}' already exists")]
    DuplicateCode(String),

    /// Any other storage-layer failure.
    ///
    /// ## When This Occurs
    /// - I/O error, disk full
    /// - Lock wait exceeded the busy timeout
    /// - Pool closed during shutdown
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database    → DbError::QueryFailed (message kept)
/// sqlx::Error::PoolClosed  → DbError::QueryFailed("Pool is closed")
/// Other                    → DbError::QueryFailed
/// ```
///
/// Unique violations are mapped to [`DbError::DuplicateCode`] at the insert
/// site, where the offending code is known.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolClosed => DbError::QueryFailed("Pool is closed".to_string()),
            _ => DbError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type for store operations.
pub type DbResult<T> = Result<T, DbError>;
