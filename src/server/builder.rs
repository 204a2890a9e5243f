//! Fake API server builder

use super::handlers::OrderAppState;
use super::router::build_router;
use crate::config::FakeApiConfig;
use crate::storage::InMemoryOrderStore;
use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Builder for the in-memory order API
///
/// # Example
///
/// ```ignore
/// FakeApiServer::new(FakeApiConfig::default())
///     .serve()
///     .await?;
/// ```
pub struct FakeApiServer {
    config: FakeApiConfig,
    store: Option<InMemoryOrderStore>,
}

impl FakeApiServer {
    pub fn new(config: FakeApiConfig) -> Self {
        Self {
            config,
            store: None,
        }
    }

    /// Use an existing store instead of creating one from the config
    pub fn with_store(mut self, store: InMemoryOrderStore) -> Self {
        self.store = Some(store);
        self
    }

    fn store(&self) -> Result<InMemoryOrderStore> {
        match &self.store {
            Some(store) => Ok(store.clone()),
            None if self.config.seed => InMemoryOrderStore::seeded(),
            None => Ok(InMemoryOrderStore::new()),
        }
    }

    /// Build the router without binding
    pub fn build(&self) -> Result<Router> {
        let state = OrderAppState {
            store: self.store()?,
        };
        build_router(state, &self.config)
    }

    /// Bind the configured address and serve until Ctrl+C or SIGTERM
    pub async fn serve(self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr.as_str()).await?;
        self.serve_on(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = self.build()?;
        let addr: SocketAddr = listener.local_addr()?;

        tracing::info!("Fake order API listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Fake order API shutdown complete");
        Ok(())
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
