//! API server implementation

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use cms_service::ContactService;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::Result;
use crate::config::ApiConfig;
use crate::routes::{AppState, router};

/// Contact management HTTP server
pub struct Server {
    config: ApiConfig,
    service: ContactService,
}

impl Server {
    /// Create a server for `service` using `config`'s listener and limits.
    pub fn new(config: ApiConfig, service: ContactService) -> Self {
        Self { config, service }
    }

    /// The full application router with request tracing.
    pub fn router(&self) -> Router {
        router(AppState::new(self.service.clone(), self.config.pagination))
            .layer(TraceLayer::new_for_http())
    }

    /// Binds the configured address.
    pub async fn bind(&self) -> Result<TcpListener> {
        let listener = TcpListener::bind(self.config.bind_address()).await?;
        Ok(listener)
    }

    /// Serves on `listener` until `shutdown` resolves, then drains in-flight
    /// requests.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = listener.local_addr()?;
        let app = self.router();
        tracing::info!(
            %addr,
            backend = self.service.store_backend(),
            "Contact Management Application started"
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("Server stopped");
        Ok(())
    }

    /// Binds and serves until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        tracing::info!("Starting Contact Management Application...");
        let listener = self.bind().await?;
        self.serve(listener, shutdown_signal()).await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use cms_storage::MemoryContactStore;

    fn server(port: u16) -> Server {
        let mut config = ApiConfig::default();
        config.server.port = port;
        Server::new(
            config,
            ContactService::new(Arc::new(MemoryContactStore::new())),
        )
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let listener = server(0).bind().await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() {
        let srv = server(0);
        let listener = srv.bind().await.unwrap();
        srv.serve(listener, async {}).await.unwrap();
    }
}
