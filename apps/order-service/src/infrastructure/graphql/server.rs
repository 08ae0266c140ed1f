//! GraphQL HTTP endpoint.
//!
//! Only POST executes queries. OPTIONS answers CORS preflight with 200; any
//! other method gets 405. Every response carries permissive CORS headers.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::any,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::error::ServiceError;
use crate::infrastructure::metrics::{self, Adapter};

use super::schema::OrderSchema;

/// Create the router serving `/graphql`.
pub fn create_graphql_router(schema: OrderSchema) -> Router {
    Router::new()
        .route("/graphql", any(graphql_handler))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(schema)
}

async fn graphql_handler(
    State(schema): State<OrderSchema>,
    method: Method,
    body: Bytes,
) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    if method != Method::POST {
        return (StatusCode::METHOD_NOT_ALLOWED, "Only POST method allowed").into_response();
    }

    let started = Instant::now();
    let request: async_graphql::Request = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            let error = ServiceError::invalid_request(format!("Invalid GraphQL request: {e}"));
            metrics::record_request_error(Adapter::Graphql, error.code());
            return (StatusCode::BAD_REQUEST, Json(error.to_http_response())).into_response();
        }
    };

    let response = schema.execute(request).await;
    metrics::record_request_duration(Adapter::Graphql, "execute", started.elapsed());
    Json(response).into_response()
}
