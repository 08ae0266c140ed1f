//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases.
//!
//! - `POST /order`: create an order (201)
//! - `GET /order`: list orders, newest first (200, `[]` when empty)
//! - `GET /order/{id}`: fetch one order (404 when absent)
//! - `GET /health`, `GET /metrics`: operational endpoints

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::application::use_cases::{CreateOrderUseCase, GetOrderUseCase, ListOrdersUseCase};
use crate::domain::order::{OrderError, OrderRepository};
use crate::error::ServiceError;
use crate::infrastructure::metrics::{self, Adapter};

use super::request::CreateOrderRequest;
use super::response::{HealthResponse, OrderResponse};

/// Application state shared across handlers.
pub struct AppState<O>
where
    O: OrderRepository + ?Sized,
{
    /// Use case for creating orders.
    pub create_order: Arc<CreateOrderUseCase<O>>,
    /// Use case for listing orders.
    pub list_orders: Arc<ListOrdersUseCase<O>>,
    /// Use case for fetching one order.
    pub get_order: Arc<GetOrderUseCase<O>>,
    /// Application version.
    pub version: String,
}

impl<O> AppState<O>
where
    O: OrderRepository + ?Sized,
{
    /// Build all use cases over one repository.
    #[must_use]
    pub fn new(order_repo: &Arc<O>, version: impl Into<String>) -> Self {
        Self {
            create_order: Arc::new(CreateOrderUseCase::new(Arc::clone(order_repo))),
            list_orders: Arc::new(ListOrdersUseCase::new(Arc::clone(order_repo))),
            get_order: Arc::new(GetOrderUseCase::new(Arc::clone(order_repo))),
            version: version.into(),
        }
    }
}

impl<O> Clone for AppState<O>
where
    O: OrderRepository + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            create_order: Arc::clone(&self.create_order),
            list_orders: Arc::clone(&self.list_orders),
            get_order: Arc::clone(&self.get_order),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<O>(state: AppState<O>) -> Router
where
    O: OrderRepository + ?Sized + 'static,
{
    Router::new()
        .route("/health", get(health_check::<O>))
        .route("/metrics", get(metrics_handler))
        .route("/order", get(list_orders::<O>).post(create_order::<O>))
        .route("/order/{id}", get(get_order::<O>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check<O>(State(state): State<AppState<O>>) -> impl IntoResponse
where
    O: OrderRepository + ?Sized,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

async fn metrics_handler() -> impl IntoResponse {
    metrics::get_metrics_handle().map_or_else(
        || {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                [("content-type", "text/plain")],
                "Metrics not initialized".to_string(),
            )
        },
        |handle| {
            (
                StatusCode::OK,
                [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
                handle.render(),
            )
        },
    )
}

/// Create order endpoint.
async fn create_order<O>(
    State(state): State<AppState<O>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError>
where
    O: OrderRepository + ?Sized,
{
    let started = Instant::now();
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected create-order body");
        ApiError::bad_request(rejection.body_text())
    })?;

    let order = state.create_order.execute(request.into()).await?;

    metrics::record_order_created(Adapter::Http);
    metrics::record_request_duration(Adapter::Http, "create_order", started.elapsed());
    Ok((StatusCode::CREATED, Json(order.into())))
}

/// List orders endpoint.
async fn list_orders<O>(
    State(state): State<AppState<O>>,
) -> Result<Json<Vec<OrderResponse>>, ApiError>
where
    O: OrderRepository + ?Sized,
{
    let started = Instant::now();
    let orders = state.list_orders.execute().await?;

    metrics::record_orders_listed(Adapter::Http);
    metrics::record_request_duration(Adapter::Http, "list_orders", started.elapsed());
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// Get order endpoint.
async fn get_order<O>(
    State(state): State<AppState<O>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError>
where
    O: OrderRepository + ?Sized,
{
    let started = Instant::now();
    let order = state.get_order.execute(&id).await?;

    metrics::record_request_duration(Adapter::Http, "get_order", started.elapsed());
    Ok(Json(order.into()))
}

/// API error type with rich error details.
#[derive(Debug)]
pub struct ApiError(ServiceError);

impl ApiError {
    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(ServiceError::invalid_request(message))
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        Self(error)
    }
}

impl From<OrderError> for ApiError {
    fn from(error: OrderError) -> Self {
        Self(error.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        metrics::record_request_error(Adapter::Http, code);
        if code.http_status().is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        (code.http_status(), Json(self.0.to_http_response())).into_response()
    }
}
