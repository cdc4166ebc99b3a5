//! # HTTP Routes
//!
//! Each handler performs exactly one store operation (or none) and renders
//! the result.
//!
//! ```text
//! ┌──────────────────────┬──────────────────────────────┬─────────────────────┐
//! │ Route                │ Store operation              │ Response            │
//! ├──────────────────────┼──────────────────────────────┼─────────────────────┤
//! │ GET  /               │ list_all                     │ list page           │
//! │ GET  /about          │ -                            │ about page          │
//! │ POST /voucher        │ create(VoucherCode::generate)│ code + barcode page │
//! │ POST /redeem         │ redeem(code)                 │ redirect / 404 page │
//! │                      │ (body, else query `code`)    │                     │
//! │ POST /delete         │ delete(codes)                │ redirect            │
//! │ GET  /barcode/{code} │ -                            │ image/png           │
//! │ GET  /static/style.css -                            │ text/css            │
//! └──────────────────────┴──────────────────────────────┴─────────────────────┘
//! ```

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tracing::{error, info};
use voucher_core::{RedeemOutcome, VoucherCode};
use voucher_db::DbError;

use crate::barcode;
use crate::error::{AppError, AppResult};
use crate::forms::FormData;
use crate::pages;
use crate::state::AppState;

/// Embedded stylesheet.
const STYLESHEET: &str = include_str!("../assets/style.css");

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list_vouchers))
        .route("/about", get(about))
        .route("/voucher", post(create_voucher))
        .route("/redeem", post(redeem_voucher))
        .route("/delete", post(delete_vouchers))
        .route("/barcode/{code}", get(barcode_png))
        .route("/static/style.css", get(stylesheet))
        .with_state(state)
}

/// Logs a store failure and wraps it for the response.
fn store_failure(operation: &'static str, err: DbError) -> AppError {
    error!(operation, %err, "Voucher store operation failed");
    AppError::Store(err)
}

// =============================================================================
// Handlers
// =============================================================================

async fn list_vouchers(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let vouchers = state
        .vouchers()
        .list_all()
        .await
        .map_err(|err| store_failure("list", err))?;

    Ok(Html(pages::index(&vouchers)))
}

async fn about(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(pages::about(&state.settings))
}

async fn create_voucher(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let code = VoucherCode::generate();

    let voucher = state
        .vouchers()
        .create(code.as_str())
        .await
        .map_err(|err| match err {
            DbError::DuplicateCode(dup) => {
                error!(code = %dup, "Generated voucher code collided with an existing one");
                AppError::Store(DbError::DuplicateCode(dup))
            }
            other => store_failure("create", other),
        })?;

    info!(code = %voucher.code, "Voucher created");
    Ok(Html(pages::voucher_created(&voucher.code)))
}

/// `code` from the form body, else from the query string, else empty.
///
/// Undecodable pairs are skipped, so a mangled scan ends up as an unknown
/// code rather than a bad request.
fn redeem_code(body: &[u8], query: Option<&str>) -> String {
    FormData::parse_lenient(body)
        .first("code")
        .map(str::to_string)
        .or_else(|| {
            query.and_then(|query| {
                FormData::parse_lenient(query.as_bytes())
                    .first("code")
                    .map(str::to_string)
            })
        })
        .unwrap_or_default()
}

async fn redeem_voucher(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> AppResult<Response> {
    let code = redeem_code(&body, query.as_deref());
    let code = code.as_str();

    let outcome = state
        .vouchers()
        .redeem(code)
        .await
        .map_err(|err| store_failure("redeem", err))?;

    match outcome {
        RedeemOutcome::Success => {
            info!(code = %code, "Voucher redeemed");
            Ok(Html(pages::redirect_home()).into_response())
        }
        RedeemOutcome::AlreadyRedeemed | RedeemOutcome::NotExists => {
            info!(code = %code, %outcome, "Voucher not redeemed");
            Ok((
                StatusCode::NOT_FOUND,
                Html(pages::redeem_failed(code, outcome)),
            )
                .into_response())
        }
    }
}

async fn delete_vouchers(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Html<String>> {
    let form = FormData::parse(&body)?;
    let codes = form.all("code");

    let deleted = state
        .vouchers()
        .delete(&codes)
        .await
        .map_err(|err| store_failure("delete", err))?;

    info!(requested = codes.len(), deleted, "Vouchers deleted");
    Ok(Html(pages::redirect_home()))
}

async fn barcode_png(Path(code): Path<String>) -> AppResult<Response> {
    let png = barcode::render_png(&code).map_err(|err| {
        error!(code = %code, %err, "Barcode rendering failed");
        AppError::Barcode(err)
    })?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

async fn stylesheet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLESHEET,
    )
}
