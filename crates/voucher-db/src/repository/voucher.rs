//! # Voucher Repository
//!
//! The four store operations plus a few diagnostics.
//!
//! ## Redeem Without a Race
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Check-then-act in one statement                      │
//! │                                                                         │
//! │  Caller A ─┐                                                            │
//! │            ├─► UPDATE vouchers SET redeemed = true                      │
//! │  Caller B ─┘     WHERE code = ? AND redeemed = false                   │
//! │                                                                         │
//! │  SQLite's write lock runs the two UPDATEs one after the other:         │
//! │                                                                         │
//! │    A: rows_affected = 1  → Success                                     │
//! │    B: rows_affected = 0  → SELECT redeemed WHERE code = ?              │
//! │                             ├── row, redeemed  → AlreadyRedeemed       │
//! │                             └── no row         → NotExists             │
//! │                                                                         │
//! │  The flag never goes back to false, so the follow-up read cannot       │
//! │  contradict the UPDATE that preceded it.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use voucher_core::{RedeemOutcome, Voucher};

/// Repository for voucher database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = VoucherRepository::new(pool);
///
/// repo.create("0V7K3M2F4GQ1S9D8B6A5").await?;
/// let outcome = repo.redeem("0V7K3M2F4GQ1S9D8B6A5").await?;
/// ```
#[derive(Debug, Clone)]
pub struct VoucherRepository {
    pool: SqlitePool,
}

impl VoucherRepository {
    /// Creates a new VoucherRepository.
    pub fn new(pool: SqlitePool) -> Self {
        VoucherRepository { pool }
    }

    /// Lists every voucher, newest first.
    ///
    /// Codes are time-sortable, so `ORDER BY code DESC` is reverse
    /// creation order. Returns an empty vector when the table is empty.
    pub async fn list_all(&self) -> DbResult<Vec<Voucher>> {
        let vouchers = sqlx::query_as::<_, Voucher>(
            "SELECT code, redeemed FROM vouchers ORDER BY code DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = vouchers.len(), "Listed vouchers");
        Ok(vouchers)
    }

    /// Gets a voucher by its code.
    ///
    /// ## Returns
    /// * `Ok(Some(Voucher))` - Voucher found
    /// * `Ok(None)` - No voucher with that code
    pub async fn get(&self, code: &str) -> DbResult<Option<Voucher>> {
        let voucher = sqlx::query_as::<_, Voucher>(
            "SELECT code, redeemed FROM vouchers WHERE code = ?1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(voucher)
    }

    /// Inserts a new, unredeemed voucher.
    ///
    /// ## Arguments
    /// * `code` - Pre-generated unique code (see `VoucherCode::generate`)
    ///
    /// ## Returns
    /// * `Ok(Voucher)` - The inserted record
    /// * `Err(DbError::DuplicateCode)` - A voucher with this code exists
    pub async fn create(&self, code: &str) -> DbResult<Voucher> {
        debug!(code = %code, "Inserting voucher");

        sqlx::query("INSERT INTO vouchers (code) VALUES (?1)")
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(|err| match err {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    DbError::DuplicateCode(code.to_string())
                }
                other => other.into(),
            })?;

        Ok(Voucher::new(code))
    }

    /// Redeems a voucher.
    ///
    /// ## Returns
    /// * `Ok(RedeemOutcome::Success)` - This call flipped `redeemed` to true
    /// * `Ok(RedeemOutcome::AlreadyRedeemed)` - It was already true
    /// * `Ok(RedeemOutcome::NotExists)` - No voucher with that code
    /// * `Err(DbError)` - Storage failure during the update or lookup
    pub async fn redeem(&self, code: &str) -> DbResult<RedeemOutcome> {
        debug!(code = %code, "Redeeming voucher");

        let result = sqlx::query(
            "UPDATE vouchers SET redeemed = true WHERE code = ?1 AND redeemed = false",
        )
        .bind(code)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(RedeemOutcome::Success);
        }

        let redeemed: Option<bool> =
            sqlx::query_scalar("SELECT redeemed FROM vouchers WHERE code = ?1")
                .bind(code)
                .fetch_optional(&self.pool)
                .await?;

        // An unredeemed row here was inserted after the UPDATE ran.
        let outcome = match redeemed {
            Some(true) => RedeemOutcome::AlreadyRedeemed,
            Some(false) | None => RedeemOutcome::NotExists,
        };

        debug!(code = %code, outcome = %outcome, "Redeem rejected");
        Ok(outcome)
    }

    /// Deletes every voucher whose code is in `codes`.
    ///
    /// Codes that do not exist are ignored. An empty slice is a no-op.
    ///
    /// ## Returns
    /// Number of deleted vouchers.
    pub async fn delete<S: AsRef<str>>(&self, codes: &[S]) -> DbResult<u64> {
        if codes.is_empty() {
            return Ok(0);
        }

        debug!(count = codes.len(), "Deleting vouchers");

        let mut builder = QueryBuilder::<Sqlite>::new("DELETE FROM vouchers WHERE code IN (");
        let mut separated = builder.separated(", ");
        for code in codes {
            separated.push_bind(code.as_ref());
        }
        separated.push_unseparated(")");

        let result = builder.build().execute(&self.pool).await?;

        Ok(result.rows_affected())
    }

    /// Counts all vouchers (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vouchers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
