use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use concierge_llm::{LlmProvider, OpenAiProvider};

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::orchestrator::Orchestrator;
use crate::tools::ToolRegistry;

pub mod chat;
pub mod error;
pub mod openapi;

pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Server {
    /// Wires up the provider, registry, and orchestrator from
    /// configuration and starts serving.
    ///
    /// A missing LLM API key or a registry build failure does not stop
    /// the server: requests then answer with the corresponding error
    /// or run tools-disabled, matching the degraded modes the
    /// orchestrator supports.
    pub async fn start(config: Config) -> CoreResult<Self> {
        let provider: Option<Arc<dyn LlmProvider>> = match OpenAiProvider::new(config.llm.clone())
        {
            Ok(provider) => Some(Arc::new(provider)),
            Err(e) => {
                warn!(error = %e, "model backend client not initialized");
                None
            }
        };
        let registry = match ToolRegistry::builtin(&config) {
            Ok(registry) => Some(registry),
            Err(e) => {
                warn!(error = %e, "tool registry unavailable, running tools-disabled");
                None
            }
        };
        let state = ServerState {
            orchestrator: Orchestrator::new(provider, registry),
        };
        Self::start_with_state(config.bind_addr, state).await
    }

    pub(crate) async fn start_with_state(
        addr: SocketAddr,
        state: ServerState,
    ) -> CoreResult<Self> {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        let app = Router::new()
            .route("/health", get(health))
            .route("/chat", post(chat::chat))
            .with_state(Arc::new(state))
            .layer(cors);

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| CoreError::Internal(format!("failed to bind {addr}: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| CoreError::Internal(e.to_string()))?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Ok(Server {
            addr,
            shutdown: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(&mut self) -> CoreResult<()> {
        if let Some(sender) = self.shutdown.take() {
            sender.send(()).map_err(|_| {
                CoreError::Internal("failed to send server shutdown signal".to_string())
            })
        } else {
            Ok(())
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

async fn health() -> &'static str {
    "ok"
}

pub(crate) struct ServerState {
    pub(crate) orchestrator: Orchestrator,
}
