//! Order Service Binary
//!
//! Starts the REST, GraphQL and (optionally) gRPC front-ends over one
//! Postgres-backed order store.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin order-service
//! cargo run --bin order-service --features grpc
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL`: Postgres connection URL
//!
//! ## Optional
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
//! - `RUN_MIGRATIONS`: Apply embedded migrations at startup (default: true)
//! - `HTTP_PORT`: REST port (default: 8000)
//! - `GRAPHQL_PORT`: GraphQL port (default: 8080)
//! - `GRPC_PORT`: gRPC port (default: 50051)
//! - `GRPC_ENABLED`: Start the gRPC listener, needs the `grpc` feature (default: false)
//! - `OTEL_ENABLED`: Enable OpenTelemetry export (default: false)
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP endpoint (default: <http://localhost:4317>)
//! - `OTEL_SERVICE_NAME`: Service name (default: order-service)
//! - `RUST_LOG`: Log filter (default: order_service=info,tower_http=info)

use std::sync::Arc;
use std::time::Duration;

use order_service::infrastructure::config::ServiceConfig;
use order_service::infrastructure::graphql::{build_schema, create_graphql_router};
use order_service::infrastructure::http::{AppState, create_router};
use order_service::infrastructure::persistence::{self, PostgresOrderRepository};
use order_service::infrastructure::server::{HttpServer, ServerError};
use order_service::infrastructure::telemetry;
use order_service::{OrderRepository, init_metrics, load_dotenv};
use tokio::signal;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Graceful shutdown timeout.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_dotenv();

    // Initialize telemetry (OpenTelemetry + tracing)
    let telemetry_guard = telemetry::init()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        otlp_export = telemetry_guard.is_exporting(),
        "Starting Order Service"
    );

    if let Err(e) = init_metrics() {
        tracing::warn!(error = %e, "Metrics disabled");
    }

    let config = ServiceConfig::from_env()?;
    log_config(&config);

    let pool = persistence::connect(&config.database).await?;
    if config.database.run_migrations {
        persistence::run_migrations(&pool).await?;
    }

    let order_repo: Arc<dyn OrderRepository> = Arc::new(PostgresOrderRepository::new(pool));
    let shutdown_token = CancellationToken::new();
    let mut servers: JoinSet<Result<(), ServerError>> = JoinSet::new();

    // REST
    let http_router = create_router(AppState::new(&order_repo, env!("CARGO_PKG_VERSION")));
    servers.spawn(
        HttpServer::new(
            "http",
            config.server.http_port,
            http_router,
            shutdown_token.clone(),
        )
        .run(),
    );

    // GraphQL
    let graphql_router = create_graphql_router(build_schema(&order_repo));
    servers.spawn(
        HttpServer::new(
            "graphql",
            config.server.graphql_port,
            graphql_router,
            shutdown_token.clone(),
        )
        .run(),
    );

    // gRPC
    if config.server.grpc_enabled {
        spawn_grpc(&mut servers, &config, &order_repo, &shutdown_token);
    }

    tracing::info!("Order service ready");

    let outcome = tokio::select! {
        () = shutdown_signal() => Ok(()),
        Some(joined) = servers.join_next() => match joined {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(e.to_string()),
            Err(e) => Err(format!("server task failed: {e}")),
        },
    };

    shutdown_token.cancel();
    tracing::info!(
        timeout_secs = SHUTDOWN_TIMEOUT.as_secs(),
        "Graceful shutdown started"
    );

    let drain = async {
        while let Some(joined) = servers.join_next().await {
            if let Ok(Err(e)) = joined {
                tracing::error!(error = %e, "Server stopped with error");
            }
        }
    };
    if tokio::time::timeout(SHUTDOWN_TIMEOUT, drain).await.is_err() {
        tracing::warn!("Shutdown timed out, aborting remaining servers");
        servers.abort_all();
    }

    tracing::info!("Order service stopped");
    outcome.map_err(Into::into)
}

#[cfg(feature = "grpc")]
fn spawn_grpc(
    servers: &mut JoinSet<Result<(), ServerError>>,
    config: &ServiceConfig,
    order_repo: &Arc<dyn OrderRepository>,
    shutdown_token: &CancellationToken,
) {
    use order_service::infrastructure::grpc::{GrpcServer, create_order_service};

    let service = create_order_service(order_repo);
    servers.spawn(
        GrpcServer::new(config.server.grpc_port, service, shutdown_token.clone()).run(),
    );
}

#[cfg(not(feature = "grpc"))]
fn spawn_grpc(
    _servers: &mut JoinSet<Result<(), ServerError>>,
    _config: &ServiceConfig,
    _order_repo: &Arc<dyn OrderRepository>,
    _shutdown_token: &CancellationToken,
) {
    tracing::warn!("GRPC_ENABLED is set but this build lacks the `grpc` feature");
}

/// Log the parsed configuration.
fn log_config(config: &ServiceConfig) {
    tracing::info!(
        http_port = config.server.http_port,
        graphql_port = config.server.graphql_port,
        grpc_port = config.server.grpc_port,
        grpc_enabled = config.server.grpc_enabled,
        max_connections = config.database.max_connections,
        run_migrations = config.database.run_migrations,
        "Configuration loaded"
    );
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
