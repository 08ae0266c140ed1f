//! HTTP request DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::dto::CreateOrderDto;

/// Body of `POST /order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Base price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Tax.
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
}

impl From<CreateOrderRequest> for CreateOrderDto {
    fn from(request: CreateOrderRequest) -> Self {
        Self::new(request.price, request.tax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_json_numbers() {
        let request: CreateOrderRequest =
            serde_json::from_str(r#"{"price": 100.0, "tax": 10}"#).unwrap();
        assert_eq!(request.price, dec!(100));
        assert_eq!(request.tax, dec!(10));
    }

    #[test]
    fn missing_price_fails() {
        let result: Result<CreateOrderRequest, _> = serde_json::from_str(r#"{"tax": 10}"#);
        assert!(result.is_err());
    }
}
