//! # Repository Module
//!
//! Database repository implementations for Voucherer.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  state.db.vouchers().redeem(code)                              │
//! │       ▼                                                                 │
//! │  VoucherRepository                                                     │
//! │  ├── list_all(&self)                                                   │
//! │  ├── create(&self, code)                                               │
//! │  ├── redeem(&self, code)                                               │
//! │  └── delete(&self, codes)                                              │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`VoucherRepository`](voucher::VoucherRepository) - Voucher lifecycle

pub mod voucher;
