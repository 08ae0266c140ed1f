//! Application Layer
//!
//! Workflows that orchestrate the order entity and the store contract, plus
//! the DTOs they accept and return. Delivery adapters only talk to this layer.

/// Workflow inputs and outputs.
pub mod dto;

/// Create, list and get workflows.
pub mod use_cases;
