//! Domain Layer
//!
//! The order entity, its value objects and the persistence contract.
//! Nothing in here knows about HTTP, GraphQL, gRPC or SQL.

/// Order entity, errors and repository contract.
pub mod order;

/// Value objects shared across the domain.
pub mod shared;
