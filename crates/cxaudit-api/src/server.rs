use crate::{create_router, AppState};
use cxaudit_core::{CxAuditError, CxConfig, Result};
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

pub struct Server {
    state: AppState,
    addr: SocketAddr,
}

impl Server {
    pub fn new(addr: SocketAddr, config: &CxConfig) -> Result<Self> {
        let state = AppState::new(config)?;
        Ok(Self { state, addr })
    }

    pub async fn run(self) -> Result<()> {
        let router = create_router(self.state);

        info!("Starting CX audit API server on {}", self.addr);
        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(CxAuditError::Io)?;

        info!("Server listening on http://{}", self.addr);
        info!("API:");
        info!("  POST /api/generate-audit - Generate or serve a cached audit");
        info!("  GET  /health - Health check");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| CxAuditError::Io(e))?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}
