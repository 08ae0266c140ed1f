//! Order errors.

use thiserror::Error;

/// Errors raised by order workflows and store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Input could not be decoded or is out of range.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Offending field.
        field: String,
        /// Error message.
        message: String,
    },

    /// No order with the given id exists.
    #[error("Order not found: {order_id}")]
    NotFound {
        /// Order ID.
        order_id: String,
    },

    /// Connectivity or constraint failure in the store.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl OrderError {
    /// Build a validation error for a field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Build a not-found error for an id.
    pub fn not_found(order_id: impl Into<String>) -> Self {
        Self::NotFound {
            order_id: order_id.into(),
        }
    }

    /// Build a storage error from any displayable cause.
    pub fn storage(cause: impl std::fmt::Display) -> Self {
        Self::Storage(cause.to_string())
    }
}
