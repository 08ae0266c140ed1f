//! Data Transfer Objects (DTOs)
//!
//! Workflow inputs and result projections shared by every delivery adapter.

mod order_dto;

pub use order_dto::{CreateOrderDto, OrderDto};
