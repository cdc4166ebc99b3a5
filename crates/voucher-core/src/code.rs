//! # Voucher Codes
//!
//! Generation and decoding of voucher codes.
//!
//! ## Code Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    20 characters × 5 bits = 100 bits                    │
//! │                                                                         │
//! │   UUIDv7 (128 bits)                                                     │
//! │   ┌──────────────┬─────┬──────────┬─────┬────────────┬──────────────┐  │
//! │   │ unix_ts_ms   │ ver │ counter  │ var │ counter +  │  random      │  │
//! │   │   48 bits    │  4  │   12     │  2  │ random     │  (dropped)   │  │
//! │   └──────────────┴─────┴──────────┴─────┴────────────┴──────────────┘  │
//! │   │◄──────────────── top 100 bits kept ─────────────►│                 │
//! │                                                                         │
//! │   Encoded with base32hex (0-9 A-V), most significant digit first.      │
//! │   "01HQ..." < "01HR..." ⇔ earlier < later                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The alphabet is ordered the same way as ASCII, so lexical order of codes
//! equals numeric order of the encoded bits, which is creation order.
//! `ORDER BY code DESC` therefore lists the newest voucher first.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

/// Number of characters in a generated code.
pub const CODE_LEN: usize = 20;

/// base32hex alphabet, uppercase.
const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHIJKLMNOPQRSTUV";

/// Bits carried by one character.
const BITS_PER_CHAR: u32 = 5;

/// Bits carried by a whole code.
const CODE_BITS: u32 = CODE_LEN as u32 * BITS_PER_CHAR;

/// Width of the millisecond timestamp prefix.
const TIMESTAMP_BITS: u32 = 48;

/// A generated voucher code.
///
/// ## Usage
/// ```rust
/// use voucher_core::VoucherCode;
///
/// let a = VoucherCode::generate();
/// let b = VoucherCode::generate();
/// assert!(a < b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VoucherCode(String);

impl VoucherCode {
    /// Generates a fresh, globally unique, time-sortable code.
    ///
    /// UUIDv7 values produced by one process are ordered by creation, and
    /// the counter bits that enforce that order sit inside the kept prefix.
    pub fn generate() -> Self {
        let bits = u128::from_be_bytes(*Uuid::now_v7().as_bytes()) >> (128 - CODE_BITS);
        VoucherCode(encode(bits))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the code, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the creation time embedded in the code.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let millis = decode(&self.0)? >> (CODE_BITS - TIMESTAMP_BITS);
        DateTime::from_timestamp_millis(i64::try_from(millis).ok()?)
    }
}

impl FromStr for VoucherCode {
    type Err = CoreError;

    /// Parses a string that has the shape of a generated code.
    fn from_str(s: &str) -> CoreResult<Self> {
        if s.len() != CODE_LEN {
            return Err(CoreError::invalid_code(
                s,
                format!("expected {CODE_LEN} characters, got {}", s.len()),
            ));
        }
        if let Some(bad) = s.chars().find(|c| !c.is_ascii() || !ALPHABET.contains(&(*c as u8))) {
            return Err(CoreError::invalid_code(
                s,
                format!("unexpected character '{bad}'"),
            ));
        }
        Ok(VoucherCode(s.to_string()))
    }
}

impl fmt::Display for VoucherCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VoucherCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn encode(bits: u128) -> String {
    (0..CODE_LEN as u32)
        .rev()
        .map(|i| {
            let index = (bits >> (i * BITS_PER_CHAR)) & 0x1f;
            ALPHABET[index as usize] as char
        })
        .collect()
}

fn decode(code: &str) -> Option<u128> {
    if code.len() != CODE_LEN {
        return None;
    }
    code.bytes().try_fold(0u128, |acc, byte| {
        let value = ALPHABET.iter().position(|&a| a == byte)?;
        Some((acc << BITS_PER_CHAR) | value as u128)
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
