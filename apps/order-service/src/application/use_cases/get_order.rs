//! Get Order Use Case

use std::sync::Arc;

use crate::application::dto::OrderDto;
use crate::domain::order::{OrderError, OrderRepository};
use crate::domain::shared::OrderId;

/// Use case for fetching a single order by id.
pub struct GetOrderUseCase<O>
where
    O: OrderRepository + ?Sized,
{
    order_repo: Arc<O>,
}

impl<O> GetOrderUseCase<O>
where
    O: OrderRepository + ?Sized,
{
    /// Create a new `GetOrderUseCase`.
    pub const fn new(order_repo: Arc<O>) -> Self {
        Self { order_repo }
    }

    /// Execute the workflow.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` for an unknown id, or a storage error.
    pub async fn execute(&self, id: &str) -> Result<OrderDto, OrderError> {
        let order = self.order_repo.find_by_id(&OrderId::new(id)).await?;
        Ok(OrderDto::from_order(&order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::CreateOrderDto;
    use crate::application::use_cases::CreateOrderUseCase;
    use crate::infrastructure::persistence::InMemoryOrderRepository;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let use_case = GetOrderUseCase::new(Arc::new(InMemoryOrderRepository::new()));
        let err = use_case.execute("missing").await.unwrap_err();
        assert_eq!(err, OrderError::not_found("missing"));
    }

    #[tokio::test]
    async fn returns_just_created_order() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let created = CreateOrderUseCase::new(Arc::clone(&repo))
            .execute(CreateOrderDto::new(dec!(19.99), dec!(1.60)))
            .await
            .unwrap();

        let fetched = GetOrderUseCase::new(repo).execute(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }
}
