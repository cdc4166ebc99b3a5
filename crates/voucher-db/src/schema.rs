//! # Schema Bootstrap
//!
//! The store has exactly one table and no migration history. The schema is
//! ensured with a single create-if-absent statement on every startup.
//!
//! ```text
//! App Startup
//!      │
//!      ▼
//! CREATE TABLE IF NOT EXISTS vouchers (...)
//!      │
//!      ├── table missing?  → created
//!      └── table present?  → no-op
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// The `vouchers` table.
pub const CREATE_VOUCHERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS vouchers (
    code TEXT PRIMARY KEY,
    redeemed BOOLEAN NOT NULL DEFAULT false
)
"#;

/// Ensures the `vouchers` table exists.
///
/// Idempotent: safe to run against a database that already has the table.
/// Any failure is reported as [`DbError::StoreUnavailable`].
pub async fn ensure_schema(pool: &SqlitePool) -> DbResult<()> {
    debug!("Ensuring vouchers table exists");

    sqlx::query(CREATE_VOUCHERS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| DbError::StoreUnavailable(format!("schema creation failed: {e}")))?;

    Ok(())
}

/// Returns the names of all user tables, for diagnostics.
pub async fn table_names(pool: &SqlitePool) -> DbResult<Vec<String>> {
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(names)
}
