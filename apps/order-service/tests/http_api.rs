//! REST API Integration Tests
//!
//! Drives the axum router end to end over the in-memory store:
//! request JSON → controller → use cases → repository → response JSON.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tower::ServiceExt;

use order_service::InMemoryOrderRepository;
use order_service::error::HttpErrorResponse;
use order_service::infrastructure::http::{AppState, OrderResponse, create_router};

fn app() -> (Arc<InMemoryOrderRepository>, Router) {
    let repo = Arc::new(InMemoryOrderRepository::new());
    let router = create_router(AppState::new(&repo, "test"));
    (repo, router)
}

fn post_order(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/order")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn create_then_list_returns_the_order() {
    let (_, app) = app();

    let created = app
        .clone()
        .oneshot(post_order(r#"{"price": 100, "tax": 10}"#))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: OrderResponse = body_json(created).await;
    assert_eq!(created.final_price, 110.0);

    let listed = app.oneshot(get("/order")).await.unwrap();
    assert_eq!(listed.status(), StatusCode::OK);
    let listed: Vec<OrderResponse> = body_json(listed).await;
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn response_uses_snake_case_final_price() {
    let (_, app) = app();

    let response = app
        .oneshot(post_order(r#"{"price": 19.99, "tax": 1.6}"#))
        .await
        .unwrap();
    let json: Value = body_json(response).await;

    assert!(json.get("final_price").is_some());
    assert!(json.get("finalPrice").is_none());
    assert_eq!(json["final_price"].as_f64().unwrap(), 21.59);
}

#[tokio::test]
async fn zero_amounts_are_accepted() {
    let (repo, app) = app();

    let response = app
        .oneshot(post_order(r#"{"price": 0, "tax": 0}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let order: OrderResponse = body_json(response).await;
    assert_eq!(order.final_price, 0.0);
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn missing_price_is_bad_request_and_stores_nothing() {
    let (repo, app) = app();

    let response = app
        .oneshot(post_order(r#"{"tax": 10}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: HttpErrorResponse = body_json(response).await;
    assert_eq!(error.code, "INVALID_REQUEST");
    assert!(repo.is_empty());
}

#[tokio::test]
async fn total_beyond_decimal_range_is_bad_request() {
    let (repo, app) = app();

    let response = app
        .oneshot(post_order(r#"{"price": 7e28, "tax": 7e28}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: HttpErrorResponse = body_json(response).await;
    assert_eq!(error.code, "INVALID_REQUEST");
    assert_eq!(
        error.details.get("field").map(String::as_str),
        Some("final_price")
    );
    assert!(repo.is_empty());
}

#[tokio::test]
async fn non_numeric_tax_is_bad_request() {
    let (repo, app) = app();

    let response = app
        .oneshot(post_order(r#"{"price": 10, "tax": "ten"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(repo.is_empty());
}

#[tokio::test]
async fn missing_content_type_is_bad_request() {
    let (repo, app) = app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/order")
                .body(Body::from(r#"{"price": 1, "tax": 1}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(repo.is_empty());
}

// =============================================================================
// List / Get
// =============================================================================

#[tokio::test]
async fn empty_store_lists_empty_array() {
    let (_, app) = app();

    let response = app.oneshot(get("/order")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"[]");
}

#[tokio::test]
async fn list_is_newest_first() {
    let (_, app) = app();

    for price in [1, 2, 3] {
        let response = app
            .clone()
            .oneshot(post_order(&format!(r#"{{"price": {price}, "tax": 0}}"#)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let listed: Vec<OrderResponse> = body_json(app.oneshot(get("/order")).await.unwrap()).await;
    let prices: Vec<f64> = listed.iter().map(|o| o.price).collect();
    assert_eq!(prices, vec![3.0, 2.0, 1.0]);
}

#[tokio::test]
async fn get_by_id_round_trips() {
    let (_, app) = app();

    let created: OrderResponse = body_json(
        app.clone()
            .oneshot(post_order(r#"{"price": 5, "tax": 0.5}"#))
            .await
            .unwrap(),
    )
    .await;

    let response = app
        .oneshot(get(&format!("/order/{}", created.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let fetched: OrderResponse = body_json(response).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_unknown_id_is_not_found() {
    let (_, app) = app();

    let response = app.oneshot(get("/order/nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: HttpErrorResponse = body_json(response).await;
    assert_eq!(error.code, "ORDER_NOT_FOUND");
    assert_eq!(error.details.get("order_id").map(String::as_str), Some("nope"));
}
