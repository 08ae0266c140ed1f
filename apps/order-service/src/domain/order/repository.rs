//! Order Repository Trait
//!
//! Defines the persistence abstraction for orders.
//! Implemented by adapters in the infrastructure layer.

use async_trait::async_trait;

use super::aggregate::Order;
use super::errors::OrderError;
use crate::domain::shared::OrderId;

/// Repository trait for Order persistence.
///
/// Implemented by the Postgres adapter and the in-memory test double.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order. There is no update path.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Storage` on constraint violation or connectivity
    /// failure.
    async fn save(&self, order: &Order) -> Result<(), OrderError>;

    /// All orders, newest first by `created_at`. Empty when there are none.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Storage` if the query fails.
    async fn find_all(&self) -> Result<Vec<Order>, OrderError>;

    /// Find an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` when no order has this id, or
    /// `OrderError::Storage` if the query fails.
    async fn find_by_id(&self, id: &OrderId) -> Result<Order, OrderError>;
}
