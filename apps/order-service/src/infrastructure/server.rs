//! Listener Runner
//!
//! Binds a TCP port and serves an axum router until the cancellation token
//! fires. Shared by the REST and GraphQL listeners.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// An axum listener bound to one port.
pub struct HttpServer {
    name: &'static str,
    port: u16,
    router: Router,
    cancel: CancellationToken,
}

impl HttpServer {
    /// Create a new server.
    #[must_use]
    pub const fn new(
        name: &'static str,
        port: u16,
        router: Router,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            name,
            port,
            router,
            cancel,
        }
    }

    /// Run the server until cancelled.
    ///
    /// # Errors
    ///
    /// Returns `ServerError` if binding fails or the server encounters a
    /// fatal error while running.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindFailed(self.port, e.to_string()))?;

        self.serve(listener).await
    }

    /// Serve on an already bound listener.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::ServerFailed` on a fatal serve error.
    pub async fn serve(self, listener: TcpListener) -> Result<(), ServerError> {
        let port = listener.local_addr().map_or(self.port, |a| a.port());
        tracing::info!(server = self.name, port, "Server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(self.cancel.cancelled_owned())
            .await
            .map_err(|e| ServerError::ServerFailed(e.to_string()))?;

        tracing::info!(server = self.name, "Server stopped");
        Ok(())
    }
}

/// Listener errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to port.
    #[error("failed to bind to port {0}: {1}")]
    BindFailed(u16, String),

    /// Server error.
    #[error("server error: {0}")]
    ServerFailed(String),
}
