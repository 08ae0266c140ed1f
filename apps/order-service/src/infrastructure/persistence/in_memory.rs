//! In-memory order repository for testing.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::order::{Order, OrderError, OrderRepository};
use crate::domain::shared::OrderId;

/// In-memory implementation of `OrderRepository`.
///
/// Suitable for tests and local development. Orders with equal `created_at`
/// list in reverse insertion order.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of orders in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.read().len()
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.read().is_empty()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), OrderError> {
        let mut orders = self.orders.write();
        if orders.iter().any(|o| o.id() == order.id()) {
            return Err(OrderError::storage(format!(
                "duplicate key value violates unique constraint: id={}",
                order.id()
            )));
        }
        orders.push(order.clone());
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<Order> = self.orders.read().iter().rev().cloned().collect();
        orders.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(orders)
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Order, OrderError> {
        self.orders
            .read()
            .iter()
            .find(|o| o.id() == id)
            .cloned()
            .ok_or_else(|| OrderError::not_found(id.as_str()))
    }
}
