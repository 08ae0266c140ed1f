//! Order DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order::{Order, OrderError};
use crate::domain::shared::Money;

/// Input for the create-order workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderDto {
    /// Base price.
    pub price: Decimal,
    /// Tax added to the price.
    pub tax: Decimal,
}

impl CreateOrderDto {
    /// Build from decimal amounts.
    #[must_use]
    pub const fn new(price: Decimal, tax: Decimal) -> Self {
        Self { price, tax }
    }

    /// Build from binary floats as carried by GraphQL and gRPC.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Validation` for NaN, infinities or values outside
    /// decimal range.
    pub fn from_f64(price: f64, tax: f64) -> Result<Self, OrderError> {
        Ok(Self {
            price: decimal_field("price", price)?,
            tax: decimal_field("tax", tax)?,
        })
    }

    /// Check the input policy: both amounts must be non-negative and their
    /// sum must fit in Decimal range.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<(), OrderError> {
        let price = Money::new(self.price);
        let tax = Money::new(self.tax);
        if price.is_negative() {
            return Err(OrderError::validation("price", "must not be negative"));
        }
        if tax.is_negative() {
            return Err(OrderError::validation("tax", "must not be negative"));
        }
        if price.checked_add(tax).is_none() {
            return Err(OrderError::validation("final_price", "out of range"));
        }
        Ok(())
    }
}

fn decimal_field(field: &str, value: f64) -> Result<Decimal, OrderError> {
    Money::from_f64(value)
        .map(|m| m.amount())
        .ok_or_else(|| OrderError::validation(field, "must be a finite number"))
}

/// Result projection of an order: `{id, price, tax, final_price}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDto {
    /// Order ID.
    pub id: String,
    /// Base price.
    pub price: Decimal,
    /// Tax.
    pub tax: Decimal,
    /// `price + tax`.
    pub final_price: Decimal,
}

impl OrderDto {
    /// Create from domain Order.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            price: order.price().amount(),
            tax: order.tax().amount(),
            final_price: order.final_price().amount(),
        }
    }

    /// Price as a binary float.
    #[must_use]
    pub fn price_f64(&self) -> f64 {
        Money::new(self.price).to_f64()
    }

    /// Tax as a binary float.
    #[must_use]
    pub fn tax_f64(&self) -> f64 {
        Money::new(self.tax).to_f64()
    }

    /// Final price as a binary float.
    #[must_use]
    pub fn final_price_f64(&self) -> f64 {
        Money::new(self.final_price).to_f64()
    }
}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        Self::from_order(order)
    }
}
