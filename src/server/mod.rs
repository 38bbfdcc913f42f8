//! HTTP front end for the cookbook: `/parse`, `/entry`, `/summary`.

pub mod handlers;
pub mod routes;

use crate::core::cookbook::Cookbook;
use crate::utils::error::Result;
use std::net::SocketAddr;
use std::sync::Arc;

pub use routes::create_router;

#[derive(Debug, Clone)]
pub struct ServerState {
    pub cookbook: Cookbook,
}

impl ServerState {
    pub fn new(cookbook: Cookbook) -> Self {
        Self { cookbook }
    }
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve(cookbook: Cookbook, addr: SocketAddr) -> Result<()> {
    let app = create_router(Arc::new(ServerState::new(cookbook)));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("🍳 Running on: http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
