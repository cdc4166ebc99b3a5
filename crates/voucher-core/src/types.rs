//! # Domain Types
//!
//! ## Voucher Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Voucher State Machine                            │
//! │                                                                         │
//! │   create ──► ┌──────────┐  redeem (Success)   ┌────────────┐          │
//! │              │  Active  │ ──────────────────► │  Redeemed  │ terminal │
//! │              └────┬─────┘                     └─────┬──────┘          │
//! │                   │ delete                          │ delete          │
//! │                   ▼                                 ▼                 │
//! │                 (gone)                            (gone)              │
//! │                                                                         │
//! │   redeem on Redeemed → AlreadyRedeemed (no mutation)                   │
//! │   redeem on missing  → NotExists       (no mutation)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use chrono::{DateTime, Utc};

use crate::code::VoucherCode;

// =============================================================================
// Voucher
// =============================================================================

/// A single-use voucher as stored in the `vouchers` table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Voucher {
    /// Unique public identifier (primary key).
    pub code: String,

    /// Whether the voucher has been used.
    pub redeemed: bool,
}

impl Voucher {
    /// Creates a fresh, unredeemed voucher record for `code`.
    pub fn new(code: impl Into<String>) -> Self {
        Voucher {
            code: code.into(),
            redeemed: false,
        }
    }

    /// Returns the lifecycle state derived from the `redeemed` flag.
    pub fn state(&self) -> VoucherState {
        VoucherState::from_redeemed(self.redeemed)
    }

    /// Returns the creation time embedded in the code, if the code was
    /// produced by [`VoucherCode::generate`].
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.code.parse::<VoucherCode>().ok()?.created_at()
    }
}

// =============================================================================
// Voucher State
// =============================================================================

/// Lifecycle state of a voucher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoucherState {
    /// Created and not yet used.
    Active,
    /// Used. Terminal.
    Redeemed,
}

impl VoucherState {
    pub fn from_redeemed(redeemed: bool) -> Self {
        if redeemed {
            VoucherState::Redeemed
        } else {
            VoucherState::Active
        }
    }

    /// Human-readable label for list pages.
    pub fn label(&self) -> &'static str {
        match self {
            VoucherState::Active => "active",
            VoucherState::Redeemed => "redeemed",
        }
    }
}

impl fmt::Display for VoucherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Redeem Outcome
// =============================================================================

/// Result of a redeem attempt that reached the store.
///
/// Storage failures are reported separately as errors; these three values
/// are the expected, non-exceptional outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedeemOutcome {
    /// The voucher was active and is now redeemed.
    Success,
    /// The voucher exists but was redeemed earlier.
    AlreadyRedeemed,
    /// No voucher with that code exists.
    NotExists,
}

impl RedeemOutcome {
    /// Message shown to the operator.
    pub fn message(&self) -> &'static str {
        match self {
            RedeemOutcome::Success => "redeemed",
            RedeemOutcome::AlreadyRedeemed => "already redeemed",
            RedeemOutcome::NotExists => "does not exist",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RedeemOutcome::Success)
    }
}

impl fmt::Display for RedeemOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_voucher_is_active() {
        let voucher = Voucher::new("ABC");
        assert!(!voucher.redeemed);
        assert_eq!(voucher.state(), VoucherState::Active);
    }

    #[test]
    fn test_state_follows_redeemed_flag() {
        assert_eq!(VoucherState::from_redeemed(false), VoucherState::Active);
        assert_eq!(VoucherState::from_redeemed(true), VoucherState::Redeemed);
        assert_eq!(VoucherState::Redeemed.to_string(), "redeemed");
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(RedeemOutcome::NotExists.to_string(), "does not exist");
        assert_eq!(RedeemOutcome::AlreadyRedeemed.to_string(), "already redeemed");
        assert!(RedeemOutcome::Success.is_success());
    }

    #[test]
    fn test_created_at_only_for_generated_codes() {
        assert!(Voucher::new("not-a-code").created_at().is_none());
        assert!(Voucher::new(VoucherCode::generate().into_inner())
            .created_at()
            .is_some());
    }
}
