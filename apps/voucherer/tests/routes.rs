//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use voucher_core::VoucherCode;
use voucher_db::{Database, DbConfig};
use voucherer_lib::{router, AppState, Settings};

async fn test_app() -> (Router, Database) {
    let db = Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database");
    let state = Arc::new(AppState::new(db.clone(), Settings::default()));
    (router(state), db)
}

struct TestResponse {
    status: StatusCode,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl TestResponse {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();

    TestResponse {
        status,
        content_type,
        body,
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.into())
        .unwrap()
}

#[tokio::test]
async fn list_of_empty_store() {
    let (app, _db) = test_app().await;

    let response = send(&app, get("/")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.content_type.as_deref().unwrap().starts_with("text/html"));
    assert!(response.text().contains("No vouchers yet."));
}

#[tokio::test]
async fn about_page() {
    let (app, _db) = test_app().await;

    let response = send(&app, get("/about")).await;

    assert_eq!(response.status, StatusCode::OK);
    let html = response.text();
    assert!(html.contains("<h1>About</h1>"));
    assert!(html.contains("http://localhost:8080"));
}

#[tokio::test]
async fn create_shows_code_and_barcode_link() {
    let (app, db) = test_app().await;

    let response = send(&app, post_form("/voucher", "")).await;
    assert_eq!(response.status, StatusCode::OK);

    let vouchers = db.vouchers().list_all().await.unwrap();
    assert_eq!(vouchers.len(), 1);
    assert!(!vouchers[0].redeemed);

    let html = response.text();
    assert!(html.contains(&vouchers[0].code));
    assert!(html.contains(&format!("/barcode/{}", vouchers[0].code)));

    let listed = send(&app, get("/")).await.text();
    assert!(listed.contains(&vouchers[0].code));
}

#[tokio::test]
async fn redeem_redirects_then_reports_already_redeemed() {
    let (app, db) = test_app().await;
    let code = VoucherCode::generate();
    db.vouchers().create(code.as_str()).await.unwrap();

    let first = send(&app, post_form("/redeem", format!("code={code}"))).await;
    assert_eq!(first.status, StatusCode::OK);
    assert!(first.text().contains(r#"<meta http-equiv="Refresh" content="0; url='/'" />"#));

    let second = send(&app, post_form("/redeem", format!("code={code}"))).await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);
    assert!(second.text().contains("already redeemed"));

    assert!(db.vouchers().get(code.as_str()).await.unwrap().unwrap().redeemed);
}

#[tokio::test]
async fn redeem_unknown_or_missing_code_is_not_found() {
    let (app, _db) = test_app().await;

    for body in ["code=NOPE", ""] {
        let response = send(&app, post_form("/redeem", body)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "body {body:?}");
        assert!(response.text().contains("does not exist"));
    }
}

#[tokio::test]
async fn redeem_with_undecodable_code_is_not_found() {
    let (app, _db) = test_app().await;

    for body in ["code=%zz", "code=%FF", "code=\u{FFFD}&code=%FF"] {
        let response = send(&app, post_form("/redeem", body)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "body {body:?}");
        assert!(response.text().contains("does not exist"));
    }
}

#[tokio::test]
async fn redeem_falls_back_to_query_code() {
    let (app, db) = test_app().await;
    let code = VoucherCode::generate();
    db.vouchers().create(code.as_str()).await.unwrap();

    let response = send(&app, post_form(&format!("/redeem?code={code}"), "")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(db.vouchers().get(code.as_str()).await.unwrap().unwrap().redeemed);
}

#[tokio::test]
async fn redeem_prefers_body_code_over_query() {
    let (app, db) = test_app().await;
    let in_body = VoucherCode::generate();
    let in_query = VoucherCode::generate();
    db.vouchers().create(in_body.as_str()).await.unwrap();
    db.vouchers().create(in_query.as_str()).await.unwrap();

    let response = send(
        &app,
        post_form(&format!("/redeem?code={in_query}"), format!("code={in_body}")),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(db.vouchers().get(in_body.as_str()).await.unwrap().unwrap().redeemed);
    assert!(!db.vouchers().get(in_query.as_str()).await.unwrap().unwrap().redeemed);
}

#[tokio::test]
async fn delete_with_undecodable_escape_is_bad_request() {
    let (app, db) = test_app().await;
    let code = VoucherCode::generate();
    db.vouchers().create(code.as_str()).await.unwrap();

    let response = send(
        &app,
        post_form("/delete", format!("x=\u{FFFD}&code={code}&code=%FF")),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(db.vouchers().count().await.unwrap(), 1);
}

#[tokio::test]
async fn redeem_echo_is_escaped() {
    let (app, _db) = test_app().await;

    let response = send(&app, post_form("/redeem", "code=%3Cb%3Ex%3C%2Fb%3E")).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let html = response.text();
    assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
    assert!(!html.contains("<b>x</b>"));
}

#[tokio::test]
async fn delete_removes_selected_and_ignores_missing() {
    let (app, db) = test_app().await;
    let gone = VoucherCode::generate();
    let kept = VoucherCode::generate();
    let missing = VoucherCode::generate();
    db.vouchers().create(gone.as_str()).await.unwrap();
    db.vouchers().create(kept.as_str()).await.unwrap();

    let response = send(
        &app,
        post_form("/delete", format!("code={gone}&code={missing}")),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text().contains("http-equiv=\"Refresh\""));
    assert!(db.vouchers().get(gone.as_str()).await.unwrap().is_none());
    assert!(db.vouchers().get(kept.as_str()).await.unwrap().is_some());
}

#[tokio::test]
async fn delete_with_malformed_form_is_bad_request() {
    let (app, db) = test_app().await;
    let code = VoucherCode::generate();
    db.vouchers().create(code.as_str()).await.unwrap();

    let response = send(&app, post_form("/delete", format!("code={code}&code=%zz"))).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(db.vouchers().count().await.unwrap(), 1);
}

#[tokio::test]
async fn barcode_is_png() {
    let (app, _db) = test_app().await;
    let code = VoucherCode::generate();

    let response = send(&app, get(&format!("/barcode/{code}"))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type.as_deref(), Some("image/png"));
    assert_eq!(&response.body[..8], b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn barcode_of_non_ascii_code_is_server_error() {
    let (app, _db) = test_app().await;

    let response = send(&app, get("/barcode/caf%C3%A9")).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn stylesheet_is_served() {
    let (app, _db) = test_app().await;

    let response = send(&app, get("/static/style.css")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.content_type.as_deref().unwrap().starts_with("text/css"));
    assert!(response.text().contains("table"));
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (app, _db) = test_app().await;

    assert_eq!(
        send(&app, get("/static/missing.css")).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn store_failure_is_server_error() {
    let (app, db) = test_app().await;
    db.close().await;

    assert_eq!(
        send(&app, get("/")).await.status,
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        send(&app, post_form("/redeem", "code=X")).await.status,
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
