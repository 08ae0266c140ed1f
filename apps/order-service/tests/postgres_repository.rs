//! Postgres Repository Integration Tests
//!
//! Exercises `PostgresOrderRepository` against a live database.
//!
//! Requires `DATABASE_URL`. Skips with a diagnostic message if absent.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use sqlx::PgPool;

use order_service::infrastructure::config::DatabaseSettings;
use order_service::infrastructure::persistence;
use order_service::{Money, Order, OrderError, OrderId, OrderRepository, PostgresOrderRepository, Timestamp};

async fn pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("SKIP: DATABASE_URL not set");
        return None;
    };

    let settings = DatabaseSettings {
        url,
        max_connections: 4,
        run_migrations: true,
    };
    let pool = persistence::connect(&settings).await.unwrap();
    persistence::run_migrations(&pool).await.unwrap();
    Some(pool)
}

#[tokio::test]
async fn save_then_find_by_id() {
    let Some(pool) = pool().await else {
        return;
    };
    let repo = PostgresOrderRepository::new(pool);

    let order = Order::new(Money::new(dec!(100.00)), Money::new(dec!(10.00)));
    repo.save(&order).await.unwrap();

    let found = repo.find_by_id(order.id()).await.unwrap();
    assert_eq!(found.id(), order.id());
    assert_eq!(found.price(), order.price());
    assert_eq!(found.tax(), order.tax());
    assert_eq!(found.final_price().amount(), dec!(110.00));
}

#[tokio::test]
async fn find_all_orders_newest_first() {
    let Some(pool) = pool().await else {
        return;
    };
    let repo = PostgresOrderRepository::new(pool);

    // Far-future timestamps keep these rows ahead of anything else in the table.
    let base = Utc::now() + Duration::days(365);
    let older = Order::with_created_at(
        Money::new(dec!(1)),
        Money::ZERO,
        Timestamp::new(base),
    );
    let newer = Order::with_created_at(
        Money::new(dec!(2)),
        Money::ZERO,
        Timestamp::new(base + Duration::seconds(1)),
    );
    repo.save(&older).await.unwrap();
    repo.save(&newer).await.unwrap();

    let ids: Vec<OrderId> = repo
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.id().clone())
        .filter(|id| id == older.id() || id == newer.id())
        .collect();

    assert_eq!(ids, vec![newer.id().clone(), older.id().clone()]);
}

#[tokio::test]
async fn duplicate_id_is_storage_error() {
    let Some(pool) = pool().await else {
        return;
    };
    let repo = PostgresOrderRepository::new(pool);

    let order = Order::new(Money::new(dec!(5)), Money::new(dec!(0.5)));
    repo.save(&order).await.unwrap();

    let result = repo.save(&order).await;
    assert!(matches!(result, Err(OrderError::Storage(_))));
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let Some(pool) = pool().await else {
        return;
    };
    let repo = PostgresOrderRepository::new(pool);

    let result = repo.find_by_id(&OrderId::generate()).await;
    assert!(matches!(result, Err(OrderError::NotFound { .. })));
}
