//! Infrastructure Layer - Adapters and external integrations.
//!
//! Driver adapters (REST, GraphQL, gRPC) call the application use cases;
//! the persistence adapters implement the domain `OrderRepository` port.

/// Environment-driven configuration.
pub mod config;

/// GraphQL schema and `/graphql` endpoint.
pub mod graphql;

/// gRPC front-end, compiled with the `grpc` feature.
#[cfg(feature = "grpc")]
pub mod grpc;

/// HTTP/REST controller.
pub mod http;

/// Prometheus metrics instrumentation.
pub mod metrics;

/// Order store adapters (Postgres, in-memory).
pub mod persistence;

/// Listener runner shared by the axum front-ends.
pub mod server;

/// OpenTelemetry tracing integration.
pub mod telemetry;
