//! Rich error handling shared by every delivery adapter.
//!
//! Workflow errors (`OrderError`) are converted into a [`ServiceError`], which
//! then renders into the wire format of the adapter that received the request.
//!
//! | Code | gRPC | HTTP | Usage |
//! |------|------|------|-------|
//! | `INVALID_REQUEST` | `INVALID_ARGUMENT` | 400 | Malformed or out-of-range input |
//! | `ORDER_NOT_FOUND` | `NOT_FOUND` | 404 | Lookup by unknown id |
//! | `STORAGE_ERROR` | `INTERNAL` | 500 | Store connectivity or constraint failure |

use std::collections::HashMap;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tonic::Code;
use tonic_types::{ErrorDetails, StatusExt};

use crate::domain::order::OrderError;

/// Domain for order service errors.
pub const ERROR_DOMAIN: &str = "order.service";

/// Error codes for the order service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Invalid request format, missing fields or out-of-range amounts.
    InvalidRequest,
    /// Order not found.
    OrderNotFound,
    /// Store failure.
    StorageError,
}

impl ErrorCode {
    /// Get the gRPC status code for this error.
    #[must_use]
    pub const fn grpc_code(&self) -> Code {
        match self {
            Self::InvalidRequest => Code::InvalidArgument,
            Self::OrderNotFound => Code::NotFound,
            Self::StorageError => Code::Internal,
        }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self.grpc_code() {
            Code::InvalidArgument => StatusCode::BAD_REQUEST,
            Code::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error reason string (for gRPC ErrorInfo and JSON bodies).
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::StorageError => "STORAGE_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// A rich error with context, independent of wire format.
#[derive(Debug, Clone, Error)]
#[error("[{}] {message}", .code.reason())]
pub struct ServiceError {
    code: ErrorCode,
    message: String,
    context: Vec<(String, String)>,
}

impl ServiceError {
    /// Create a new service error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Invalid request format.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Convert to a tonic Status with rich error details.
    #[must_use]
    pub fn to_status(&self) -> tonic::Status {
        let mut details = ErrorDetails::new();

        let metadata: HashMap<String, String> = self.context.iter().cloned().collect();
        details.set_error_info(self.code.reason(), ERROR_DOMAIN, metadata);

        if self.code == ErrorCode::InvalidRequest {
            let field = self
                .context
                .iter()
                .find(|(k, _)| k == "field")
                .map_or("request", |(_, v)| v.as_str());
            details.add_bad_request_violation(field, &self.message);
        }

        tonic::Status::with_error_details(self.code.grpc_code(), &self.message, details)
    }

    /// Convert to an HTTP-compatible error response body.
    #[must_use]
    pub fn to_http_response(&self) -> HttpErrorResponse {
        HttpErrorResponse {
            code: self.code.reason().to_string(),
            message: self.message.clone(),
            details: self.context.iter().cloned().collect(),
        }
    }
}

impl From<OrderError> for ServiceError {
    fn from(error: OrderError) -> Self {
        match &error {
            OrderError::Validation { field, .. } => {
                let field = field.clone();
                Self::new(ErrorCode::InvalidRequest, error.to_string()).with_context("field", field)
            }
            OrderError::NotFound { order_id } => {
                let order_id = order_id.clone();
                Self::new(ErrorCode::OrderNotFound, error.to_string())
                    .with_context("order_id", order_id)
            }
            OrderError::Storage(_) => Self::new(ErrorCode::StorageError, error.to_string()),
        }
    }
}

/// HTTP-compatible error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpErrorResponse {
    /// Error code string.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Additional details.
    pub details: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(ErrorCode::InvalidRequest, Code::InvalidArgument, StatusCode::BAD_REQUEST)]
    #[test_case(ErrorCode::OrderNotFound, Code::NotFound, StatusCode::NOT_FOUND)]
    #[test_case(ErrorCode::StorageError, Code::Internal, StatusCode::INTERNAL_SERVER_ERROR)]
    fn code_mapping(code: ErrorCode, grpc: Code, http: StatusCode) {
        assert_eq!(code.grpc_code(), grpc);
        assert_eq!(code.http_status(), http);
    }

    #[test]
    fn from_validation_error_keeps_field() {
        let error = ServiceError::from(OrderError::validation("price", "must not be negative"));

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.context(), &[("field".to_string(), "price".to_string())]);
    }

    #[test]
    fn to_status_carries_error_info() {
        let status = ServiceError::from(OrderError::not_found("ord-1")).to_status();

        assert_eq!(status.code(), Code::NotFound);
        let details = status.get_error_details();
        let info = details.error_info().unwrap();
        assert_eq!(info.reason, "ORDER_NOT_FOUND");
        assert_eq!(info.domain, ERROR_DOMAIN);
        assert_eq!(info.metadata.get("order_id").unwrap(), "ord-1");
    }

    #[test]
    fn to_status_adds_bad_request_violation() {
        let status = ServiceError::from(OrderError::validation("tax", "must be a finite number"))
            .to_status();

        assert_eq!(status.code(), Code::InvalidArgument);
        let details = status.get_error_details();
        let bad_request = details.bad_request().unwrap();
        assert_eq!(bad_request.field_violations[0].field, "tax");
    }

    #[test]
    fn to_http_response_body() {
        let response = ServiceError::from(OrderError::storage("disk full")).to_http_response();

        assert_eq!(response.code, "STORAGE_ERROR");
        assert_eq!(response.message, "Storage error: disk full");
        assert!(response.details.is_empty());
    }

    #[test]
    fn display_includes_reason() {
        let error = ServiceError::invalid_request("Missing field");
        assert_eq!(error.to_string(), "[INVALID_REQUEST] Missing field");
    }
}
