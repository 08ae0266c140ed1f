//! Use Cases
//!
//! Each workflow holds a shared handle to the store and nothing else.

mod create_order;
mod get_order;
mod list_orders;

pub use create_order::CreateOrderUseCase;
pub use get_order::GetOrderUseCase;
pub use list_orders::ListOrdersUseCase;
