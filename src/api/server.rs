//! Server lifecycle: bind, spawn the axum server, shut down on signal.
//!
//! `start_server` returns a handle with a shutdown channel so tests and
//! embedders can stop it; `serve` is the binary's entry point and runs
//! until Ctrl-C.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::triage_router;
use crate::core_state::CoreState;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("Failed to get server address: {0}")]
    LocalAddr(std::io::Error),
    #[error("Server error: {0}")]
    Serve(std::io::Error),
    #[error("Server task failed: {0}")]
    Task(String),
}

// ═══════════════════════════════════════════════════════════
// Running server handle
// ═══════════════════════════════════════════════════════════

pub struct TriageServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<(), ServerError>>,
}

impl TriageServer {
    /// Send the shutdown signal. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish serving in-flight requests.
    pub async fn wait(self) -> Result<(), ServerError> {
        self.task
            .await
            .map_err(|e| ServerError::Task(e.to_string()))?
    }
}

// ═══════════════════════════════════════════════════════════
// Server lifecycle
// ═══════════════════════════════════════════════════════════

/// Bind `addr` and spawn the server in a background task.
///
/// Port 0 binds an ephemeral port; the real address is on the handle.
pub async fn start_server(
    addr: SocketAddr,
    core: Arc<CoreState>,
) -> Result<TriageServer, ServerError> {
    // 1. Bind
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let addr = listener.local_addr().map_err(ServerError::LocalAddr)?;

    // 2. Build the router
    let app = triage_router(core);

    // 3. Shutdown signal
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    // 4. Spawn
    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Server received shutdown signal");
        };

        tracing::info!(%addr, "Server started");

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(ServerError::Serve);

        tracing::info!("Server stopped");
        result
    });

    Ok(TriageServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

/// Run until Ctrl-C, then drain in-flight requests.
pub async fn serve(addr: SocketAddr, core: Arc<CoreState>) -> Result<(), ServerError> {
    let mut server = start_server(addr, core).await?;

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
    }
    server.shutdown();
    server.wait().await
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::Duration;

    use crate::pipeline::extraction::SymptomExtractor;

    fn test_core() -> Arc<CoreState> {
        Arc::new(CoreState::new(
            SymptomExtractor::rules_only(),
            Duration::from_secs(5),
        ))
    }

    fn localhost() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
    }

    #[tokio::test]
    async fn start_serve_and_stop() {
        let mut server = start_server(localhost(), test_core())
            .await
            .expect("server should start");
        assert!(server.addr.port() > 0);

        let url = format!("http://{}/health", server.addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["status"], "ok");

        server.shutdown();
        server.wait().await.unwrap();
    }

    #[tokio::test]
    async fn serves_triage_over_http() {
        let mut server = start_server(localhost(), test_core()).await.unwrap();

        let resp = reqwest::Client::new()
            .post(format!("http://{}/triage", server.addr))
            .header("Content-Type", "application/json")
            .body(r#"{"conscious":"no"}"#)
            .send()
            .await
            .unwrap();
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["call_now"], true);

        server.shutdown();
    }

    #[tokio::test]
    async fn bind_conflict_is_reported() {
        let mut first = start_server(localhost(), test_core()).await.unwrap();
        let err = start_server(first.addr, test_core()).await.err().unwrap();
        assert!(matches!(err, ServerError::Bind { .. }));
        first.shutdown();
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let mut server = start_server(localhost(), test_core()).await.unwrap();
        server.shutdown();
        server.shutdown(); // Second call should be safe
    }
}
