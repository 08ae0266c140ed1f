//! List Orders Use Case

use std::sync::Arc;

use crate::application::dto::OrderDto;
use crate::domain::order::{OrderError, OrderRepository};

/// Use case for listing all orders, newest first.
pub struct ListOrdersUseCase<O>
where
    O: OrderRepository + ?Sized,
{
    order_repo: Arc<O>,
}

impl<O> ListOrdersUseCase<O>
where
    O: OrderRepository + ?Sized,
{
    /// Create a new `ListOrdersUseCase`.
    pub const fn new(order_repo: Arc<O>) -> Self {
        Self { order_repo }
    }

    /// Execute the workflow, preserving the store's ordering.
    ///
    /// # Errors
    ///
    /// Returns whatever the store returns from `find_all`.
    pub async fn execute(&self) -> Result<Vec<OrderDto>, OrderError> {
        let orders = self.order_repo.find_all().await?;
        tracing::debug!(count = orders.len(), "Orders listed");
        Ok(orders.iter().map(OrderDto::from_order).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::Order;
    use crate::domain::order::repository::MockOrderRepository;
    use crate::domain::shared::{Money, Timestamp};
    use crate::infrastructure::persistence::InMemoryOrderRepository;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn empty_store_returns_empty_list() {
        let use_case = ListOrdersUseCase::new(Arc::new(InMemoryOrderRepository::new()));
        let orders = use_case.execute().await.unwrap();
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn newest_order_comes_first() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let now = Utc::now();
        let a = Order::with_created_at(
            Money::new(dec!(1)),
            Money::new(dec!(0)),
            Timestamp::new(now - Duration::seconds(1)),
        );
        let b = Order::with_created_at(Money::new(dec!(2)), Money::new(dec!(0)), Timestamp::new(now));
        repo.save(&a).await.unwrap();
        repo.save(&b).await.unwrap();

        let use_case = ListOrdersUseCase::new(repo);
        let orders = use_case.execute().await.unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, b.id().as_str());
        assert_eq!(orders[1].id, a.id().as_str());
    }

    #[tokio::test]
    async fn storage_error_passes_through_unchanged() {
        let mut repo = MockOrderRepository::new();
        repo.expect_find_all()
            .returning(|| Err(OrderError::storage("timeout")));
        let use_case = ListOrdersUseCase::new(Arc::new(repo));

        let err = use_case.execute().await.unwrap_err();
        assert_eq!(err, OrderError::Storage("timeout".to_string()));
    }
}
