//! PostgreSQL order repository.
//!
//! Every statement uses bind parameters. The pool is borrowed from the
//! process; this adapter never opens or closes connections itself.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::order::{Order, OrderError, OrderRepository, ReconstitutedOrderParams};
use crate::domain::shared::{Money, OrderId, Timestamp};

const INSERT_ORDER: &str = r"
    INSERT INTO orders (id, price, tax, final_price, created_at)
    VALUES ($1, $2, $3, $4, $5)
";

const SELECT_ALL_ORDERS: &str = r"
    SELECT id, price, tax, final_price, created_at
    FROM orders
    ORDER BY created_at DESC
";

const SELECT_ORDER_BY_ID: &str = r"
    SELECT id, price, tax, final_price, created_at
    FROM orders
    WHERE id = $1
";

/// `OrderRepository` backed by the `orders` table.
#[derive(Debug, Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    /// Create a repository over a shared pool handle.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn order_from_row(row: &PgRow) -> Result<Order, OrderError> {
        let id: String = row.try_get("id").map_err(OrderError::storage)?;
        let price: Decimal = row.try_get("price").map_err(OrderError::storage)?;
        let tax: Decimal = row.try_get("tax").map_err(OrderError::storage)?;
        let final_price: Decimal = row.try_get("final_price").map_err(OrderError::storage)?;
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(OrderError::storage)?;

        Ok(Order::reconstitute(ReconstitutedOrderParams {
            id: OrderId::new(id),
            price: Money::new(price),
            tax: Money::new(tax),
            final_price: Money::new(final_price),
            created_at: Timestamp::new(created_at),
        }))
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), OrderError> {
        sqlx::query(INSERT_ORDER)
            .bind(order.id().as_str())
            .bind(order.price().amount())
            .bind(order.tax().amount())
            .bind(order.final_price().amount())
            .bind(order.created_at().as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(order_id = %order.id(), error = %e, "Failed to insert order");
                OrderError::storage(e)
            })?;

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Order>, OrderError> {
        let rows = sqlx::query(SELECT_ALL_ORDERS)
            .fetch_all(&self.pool)
            .await
            .map_err(OrderError::storage)?;

        rows.iter().map(Self::order_from_row).collect()
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Order, OrderError> {
        let row = sqlx::query(SELECT_ORDER_BY_ID)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(OrderError::storage)?;

        row.as_ref().map_or_else(
            || Err(OrderError::not_found(id.as_str())),
            Self::order_from_row,
        )
    }
}
