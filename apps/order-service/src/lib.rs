#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Order Service
//!
//! Accepts a price and a tax, derives `final_price = price + tax`, persists
//! the order and lists previously created orders, newest first.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: the `Order` entity, money and id value objects, and the
//!   `OrderRepository` port.
//! - **Application**: create/list/get workflows and their DTOs.
//! - **Infrastructure**: Postgres and in-memory stores, the REST, GraphQL
//!   and gRPC front-ends, configuration, logging and metrics.
//!
//! # Front-ends
//!
//! | Adapter | Default port | Surface |
//! |---------|--------------|---------|
//! | REST | 8000 | `POST /order`, `GET /order`, `GET /order/{id}` |
//! | GraphQL | 8080 | `POST /graphql` |
//! | gRPC | 50051 | `order.v1.OrderService` (feature `grpc`) |
//!
//! All three share one store, so an order created through one front-end is
//! listed by the others.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Order entity and repository port.
pub mod domain;

/// Application layer - Use cases and DTOs.
pub mod application;

/// Cross-adapter error model.
pub mod error;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::order::{Order, OrderError, OrderRepository};
pub use domain::shared::{Money, OrderId, Timestamp};

// Application types
pub use application::dto::{CreateOrderDto, OrderDto};
pub use application::use_cases::{CreateOrderUseCase, GetOrderUseCase, ListOrdersUseCase};

// Errors
pub use error::{ErrorCode, ServiceError};

// Infrastructure
pub use infrastructure::config::{ConfigError, ServiceConfig};
pub use infrastructure::metrics::init_metrics;
pub use infrastructure::persistence::{InMemoryOrderRepository, PostgresOrderRepository};

// =============================================================================
// Environment
// =============================================================================

/// Load a `.env` file from the current directory or the nearest ancestor
/// that has one. Absence is not an error.
pub fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}
