//! Create Order Use Case

use std::sync::Arc;

use crate::application::dto::{CreateOrderDto, OrderDto};
use crate::domain::order::{Order, OrderError, OrderRepository};
use crate::domain::shared::Money;

/// Use case for creating an order.
///
/// Builds the entity, inserts it once and returns the projection. Storage
/// errors are returned unchanged.
pub struct CreateOrderUseCase<O>
where
    O: OrderRepository + ?Sized,
{
    order_repo: Arc<O>,
}

impl<O> CreateOrderUseCase<O>
where
    O: OrderRepository + ?Sized,
{
    /// Create a new `CreateOrderUseCase`.
    pub const fn new(order_repo: Arc<O>) -> Self {
        Self { order_repo }
    }

    /// Execute the workflow.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Validation` for negative amounts (nothing is
    /// persisted), or whatever the store returns from `save`.
    pub async fn execute(&self, dto: CreateOrderDto) -> Result<OrderDto, OrderError> {
        dto.validate()?;

        let order = Order::new(Money::new(dto.price), Money::new(dto.tax));
        self.order_repo.save(&order).await?;

        tracing::info!(
            order_id = %order.id(),
            price = %order.price(),
            tax = %order.tax(),
            final_price = %order.final_price(),
            "Order created"
        );

        Ok(OrderDto::from_order(&order))
    }
}
