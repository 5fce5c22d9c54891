use inboxd::db;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite://:memory:")
        .await
        .expect("connect memory sqlite")
}

#[tokio::test]
async fn upgrade_seeds_once_and_is_idempotent() {
    let pool = memory_pool().await;

    db::upgrade(&pool).await.expect("first upgrade");
    db::upgrade(&pool).await.expect("second upgrade");

    let emails: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM emails")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(emails, 8, "seed rows must not be duplicated");

    let attachments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attachments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(attachments, 1);

    let ledger: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _migrations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(ledger, 1);
}

#[tokio::test]
async fn downgrade_drops_tables_and_ledger_entry() {
    let pool = memory_pool().await;

    db::upgrade(&pool).await.expect("upgrade");
    db::downgrade(&pool).await.expect("downgrade");

    let emails_gone = sqlx::query("SELECT COUNT(*) FROM emails")
        .fetch_one(&pool)
        .await;
    assert!(emails_gone.is_err(), "emails table should be dropped");

    let ledger: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _migrations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(ledger, 0);

    // A fresh upgrade reseeds from scratch.
    db::upgrade(&pool).await.expect("re-upgrade");
    let emails: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM emails")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(emails, 8);

    // Calling downgrade twice in a row stays safe.
    db::downgrade(&pool).await.expect("downgrade");
    db::downgrade(&pool).await.expect("repeat downgrade");
}
