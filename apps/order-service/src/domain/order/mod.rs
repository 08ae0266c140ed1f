//! Order Bounded Context
//!
//! - `aggregate`: the `Order` entity and its `final_price = price + tax` invariant
//! - `errors`: error taxonomy shared by the store contract and the workflows
//! - `repository`: the store contract implemented by persistence adapters

pub mod aggregate;
pub mod errors;
pub mod repository;

pub use aggregate::{Order, ReconstitutedOrderParams};
pub use errors::OrderError;
pub use repository::OrderRepository;
