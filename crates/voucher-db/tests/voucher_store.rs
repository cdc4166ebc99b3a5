//! Behavioural tests for the voucher store.

use std::collections::HashSet;

use voucher_core::{RedeemOutcome, Voucher, VoucherCode};
use voucher_db::{Database, DbConfig, DbError};

async fn memory_db() -> Database {
    Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database")
}

#[tokio::test]
async fn redeem_twice_is_success_then_already_redeemed() {
    let db = memory_db().await;
    let code = VoucherCode::generate();
    db.vouchers().create(code.as_str()).await.unwrap();

    assert_eq!(
        db.vouchers().redeem(code.as_str()).await.unwrap(),
        RedeemOutcome::Success
    );
    assert_eq!(
        db.vouchers().redeem(code.as_str()).await.unwrap(),
        RedeemOutcome::AlreadyRedeemed
    );
}

#[tokio::test]
async fn redeem_unknown_code_is_not_exists() {
    let db = memory_db().await;
    let fresh = VoucherCode::generate();

    for code in ["", "NOPE", fresh.as_str()] {
        assert_eq!(
            db.vouchers().redeem(code).await.unwrap(),
            RedeemOutcome::NotExists
        );
    }
    assert_eq!(db.vouchers().count().await.unwrap(), 0);
}

#[tokio::test]
async fn created_voucher_is_listed_unredeemed() {
    let db = memory_db().await;
    let code = VoucherCode::generate();

    let created = db.vouchers().create(code.as_str()).await.unwrap();
    assert_eq!(created, Voucher::new(code.as_str()));

    let listed = db.vouchers().list_all().await.unwrap();
    assert!(listed.contains(&Voucher {
        code: code.into_inner(),
        redeemed: false,
    }));
}

#[tokio::test]
async fn list_is_strictly_descending() {
    let db = memory_db().await;
    for _ in 0..50 {
        db.vouchers()
            .create(VoucherCode::generate().as_str())
            .await
            .unwrap();
    }

    let listed = db.vouchers().list_all().await.unwrap();
    assert_eq!(listed.len(), 50);
    for pair in listed.windows(2) {
        assert!(pair[0].code > pair[1].code);
    }
}

#[tokio::test]
async fn list_of_empty_store_is_empty() {
    let db = memory_db().await;
    assert!(db.vouchers().list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_ignores_missing_codes() {
    let db = memory_db().await;
    let present = VoucherCode::generate();
    let missing = VoucherCode::generate();
    let kept = VoucherCode::generate();
    db.vouchers().create(present.as_str()).await.unwrap();
    db.vouchers().create(kept.as_str()).await.unwrap();

    let deleted = db
        .vouchers()
        .delete(&[present.as_str(), missing.as_str()])
        .await
        .unwrap();

    assert_eq!(deleted, 1);
    assert!(db.vouchers().get(present.as_str()).await.unwrap().is_none());
    assert!(db.vouchers().get(kept.as_str()).await.unwrap().is_some());
}

#[tokio::test]
async fn delete_of_empty_set_is_noop() {
    let db = memory_db().await;
    db.vouchers()
        .create(VoucherCode::generate().as_str())
        .await
        .unwrap();

    let none: [&str; 0] = [];
    assert_eq!(db.vouchers().delete(&none).await.unwrap(), 0);
    assert_eq!(db.vouchers().count().await.unwrap(), 1);
}

#[tokio::test]
async fn delete_removes_redeemed_and_active_vouchers() {
    let db = memory_db().await;
    let active = VoucherCode::generate();
    let redeemed = VoucherCode::generate();
    db.vouchers().create(active.as_str()).await.unwrap();
    db.vouchers().create(redeemed.as_str()).await.unwrap();
    db.vouchers().redeem(redeemed.as_str()).await.unwrap();

    let codes = vec![active.into_inner(), redeemed.into_inner()];
    assert_eq!(db.vouchers().delete(&codes).await.unwrap(), 2);
    assert_eq!(db.vouchers().count().await.unwrap(), 0);
}

#[tokio::test]
async fn duplicate_create_is_duplicate_code() {
    let db = memory_db().await;
    let code = VoucherCode::generate();
    db.vouchers().create(code.as_str()).await.unwrap();

    let err = db.vouchers().create(code.as_str()).await.unwrap_err();
    match err {
        DbError::DuplicateCode(dup) => assert_eq!(dup, code.as_str()),
        other => panic!("expected DuplicateCode, got {other:?}"),
    }
}

#[tokio::test]
async fn deleted_voucher_cannot_be_redeemed() {
    let db = memory_db().await;
    let code = VoucherCode::generate();
    db.vouchers().create(code.as_str()).await.unwrap();
    db.vouchers().delete(&[code.as_str()]).await.unwrap();

    assert_eq!(
        db.vouchers().redeem(code.as_str()).await.unwrap(),
        RedeemOutcome::NotExists
    );
}

#[tokio::test]
async fn operations_on_closed_store_fail_with_query_error() {
    let db = memory_db().await;
    db.close().await;

    assert!(matches!(
        db.vouchers().list_all().await,
        Err(DbError::QueryFailed(_))
    ));
    assert!(matches!(
        db.vouchers().redeem("X").await,
        Err(DbError::QueryFailed(_))
    ));
}

#[tokio::test]
async fn schema_creation_is_idempotent_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.sqlite");
    let code = VoucherCode::generate();

    let db = Database::new(DbConfig::new(&path)).await.unwrap();
    db.vouchers().create(code.as_str()).await.unwrap();
    db.vouchers().redeem(code.as_str()).await.unwrap();
    db.close().await;

    let reopened = Database::new(DbConfig::new(&path)).await.unwrap();
    assert_eq!(
        reopened.vouchers().list_all().await.unwrap(),
        vec![Voucher {
            code: code.into_inner(),
            redeemed: true,
        }]
    );
    reopened.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_redeem_has_exactly_one_winner() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(DbConfig::new(dir.path().join("race.sqlite")).max_connections(8))
        .await
        .unwrap();

    for _ in 0..10 {
        let code = VoucherCode::generate();
        db.vouchers().create(code.as_str()).await.unwrap();

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let repo = db.vouchers();
                let code = code.clone();
                tokio::spawn(async move { repo.redeem(code.as_str()).await })
            })
            .collect();

        let mut outcomes = Vec::new();
        for task in tasks {
            outcomes.push(task.await.unwrap().unwrap());
        }

        let winners = outcomes.iter().filter(|o| o.is_success()).count();
        assert_eq!(winners, 1, "outcomes: {outcomes:?}");
        assert!(outcomes
            .iter()
            .all(|o| matches!(o, RedeemOutcome::Success | RedeemOutcome::AlreadyRedeemed)));
    }

    db.close().await;
}

#[tokio::test]
async fn end_to_end_lifecycle() {
    let db = memory_db().await;
    let repo = db.vouchers();

    let x = VoucherCode::generate();
    repo.create(x.as_str()).await.unwrap();
    assert_eq!(
        repo.list_all().await.unwrap(),
        vec![Voucher::new(x.as_str())]
    );

    assert_eq!(repo.redeem(x.as_str()).await.unwrap(), RedeemOutcome::Success);
    assert_eq!(
        repo.redeem(x.as_str()).await.unwrap(),
        RedeemOutcome::AlreadyRedeemed
    );

    repo.delete(&[x.as_str()]).await.unwrap();
    assert!(repo.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn generated_codes_do_not_collide() {
    let db = memory_db().await;
    let mut seen = HashSet::new();

    for _ in 0..200 {
        let code = VoucherCode::generate();
        assert!(seen.insert(code.clone()));
        db.vouchers().create(code.as_str()).await.unwrap();
    }
    assert_eq!(db.vouchers().count().await.unwrap(), 200);
}
