//! Build Script for Order Service
//!
//! Generates Rust protobuf stubs from the workspace proto definitions when the
//! `grpc` feature is enabled. Without the feature nothing is generated and
//! neither `tonic-prost-build` nor `protoc` is needed.
//!
//! # Panics Policy
//!
//! Build scripts halt the build on failure; there is no caller to propagate
//! errors to.
#![allow(clippy::expect_used)]

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=migrations");
    println!("cargo:rerun-if-changed=../../packages/proto/order/");

    #[cfg(feature = "grpc")]
    compile_order_proto();
}

#[cfg(feature = "grpc")]
fn compile_order_proto() {
    use std::path::PathBuf;

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let proto_root = manifest_dir.join("../../packages/proto");
    let proto_file = proto_root.join("order/v1/order.proto");

    println!("cargo:rerun-if-changed={}", proto_file.display());

    tonic_prost_build::configure()
        .build_client(true) // Client is used by the integration tests
        .build_server(true)
        .compile_protos(&[proto_file], &[proto_root])
        .expect("Failed to compile protobuf definitions; ensure protoc is installed");
}
