//! # Handler Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Handler: Result<Response, AppError>                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Bad form body? ──── AppError::MalformedForm ──────────► 400           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Store failure? ──── AppError::Store(DbError) ─────────► 500           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Barcode failure? ── AppError::Barcode(BarcodeError) ──► 500           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Success ──────────────────────────────────────────────► 200           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown and already-redeemed vouchers are not errors here: they are
//! [`voucher_core::RedeemOutcome`] values and the redeem handler answers
//! them itself with a 404 page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use voucher_db::DbError;

use crate::barcode::BarcodeError;
use crate::pages;

/// Errors a handler can return.
#[derive(Debug, Error)]
pub enum AppError {
    /// Form body was not UTF-8 or had a broken percent escape.
    #[error("Malformed form: {0}")]
    MalformedForm(String),

    #[error("Store error: {0}")]
    Store(#[from] DbError),

    #[error("Barcode error: {0}")]
    Barcode(#[from] BarcodeError),
}

impl AppError {
    /// HTTP status this error is answered with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedForm(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::Barcode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::MalformedForm(_) => "The submitted form could not be read.",
            AppError::Store(_) => "The voucher store could not complete the request.",
            AppError::Barcode(_) => "The barcode could not be rendered.",
        };

        (status, Html(pages::error_page(status, message))).into_response()
    }
}

/// Result type for handlers.
pub type AppResult<T> = Result<T, AppError>;
