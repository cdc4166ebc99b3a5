//! # Error Types
//!
//! Domain-specific error types for voucher-core.
//!
//! ## Error Hierarchy
//! ```text
//! voucher-core  CoreError  - malformed voucher codes
//! voucher-db    DbError    - store failures (separate crate)
//! voucherer     AppError   - what the HTTP layer maps to status codes
//! ```
//!
//! Redemption outcomes such as "already redeemed" are NOT errors; they are
//! values of [`crate::RedeemOutcome`].

use thiserror::Error;

/// Core domain errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A string does not have the shape of a generated voucher code.
    ///
    /// ## When This Occurs
    /// - Decoding the timestamp of a code that was inserted by hand
    /// - Wrong length or a character outside `0-9A-V`
    #[error("Invalid voucher code '{code}': {reason}")]
    InvalidCode { code: String, reason: String },
}

impl CoreError {
    /// Creates an InvalidCode error.
    pub fn invalid_code(code: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidCode {
            code: code.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::invalid_code("abc", "expected 20 characters");
        assert_eq!(
            err.to_string(),
            "Invalid voucher code 'abc': expected 20 characters"
        );
    }
}
