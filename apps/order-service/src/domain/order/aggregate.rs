//! Order Entity
//!
//! An order is a priced record with a derived total. It is created once,
//! never updated and never deleted.

use serde::Serialize;

use crate::domain::shared::{Money, OrderId, Timestamp};

/// Parameters for reconstituting an Order from storage.
///
/// Used by repositories to rebuild entities from persisted rows. The stored
/// `final_price` is taken as-is.
#[derive(Debug, Clone)]
pub struct ReconstitutedOrderParams {
    /// Order identifier.
    pub id: OrderId,
    /// Base price.
    pub price: Money,
    /// Tax added to the price.
    pub tax: Money,
    /// Persisted total.
    pub final_price: Money,
    /// Creation timestamp.
    pub created_at: Timestamp,
}

/// Order entity.
///
/// `final_price == price + tax` holds from construction onwards. Stored rows
/// come back through [`Order::reconstitute`] only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    id: OrderId,
    price: Money,
    tax: Money,
    final_price: Money,
    created_at: Timestamp,
}

impl Order {
    /// Create a new order with a fresh id and the current time.
    #[must_use]
    pub fn new(price: Money, tax: Money) -> Self {
        Self::with_created_at(price, tax, Timestamp::now())
    }

    /// Create a new order with an explicit creation time.
    #[must_use]
    pub fn with_created_at(price: Money, tax: Money, created_at: Timestamp) -> Self {
        let mut order = Self {
            id: OrderId::generate(),
            price,
            tax,
            final_price: Money::ZERO,
            created_at,
        };
        order.recompute_final_price();
        order
    }

    /// Reconstitute an order from storage.
    #[must_use]
    pub fn reconstitute(params: ReconstitutedOrderParams) -> Self {
        Self {
            id: params.id,
            price: params.price,
            tax: params.tax,
            final_price: params.final_price,
            created_at: params.created_at,
        }
    }

    /// Recompute `final_price` from the current price and tax.
    pub fn recompute_final_price(&mut self) {
        self.final_price = self.price + self.tax;
    }

    /// Get the order ID.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Get the base price.
    #[must_use]
    pub const fn price(&self) -> Money {
        self.price
    }

    /// Get the tax.
    #[must_use]
    pub const fn tax(&self) -> Money {
        self.tax
    }

    /// Get the derived total.
    #[must_use]
    pub const fn final_price(&self) -> Money {
        self.final_price
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
