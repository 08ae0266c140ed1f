//! gRPC Adapter (Driver Adapter)
//!
//! Tonic-based gRPC service that delegates to application use cases.
//! Compiled only with the `grpc` feature.

mod service;

pub use service::{GrpcServer, OrderServiceAdapter, create_order_service};

/// Include generated protobuf code.
#[allow(
    dead_code,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
pub mod proto {
    pub mod order {
        pub mod v1 {
            include!(concat!(env!("OUT_DIR"), "/order.v1.rs"));
        }
    }
}
