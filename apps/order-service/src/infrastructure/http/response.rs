//! HTTP response DTOs.

use serde::{Deserialize, Serialize};

use crate::application::dto::OrderDto;

/// Order as returned by `POST /order` and `GET /order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    /// Order ID.
    pub id: String,
    /// Base price.
    pub price: f64,
    /// Tax.
    pub tax: f64,
    /// `price + tax`.
    pub final_price: f64,
}

impl From<OrderDto> for OrderResponse {
    fn from(dto: OrderDto) -> Self {
        Self {
            price: dto.price_f64(),
            tax: dto.tax_f64(),
            final_price: dto.final_price_f64(),
            id: dto.id,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}
