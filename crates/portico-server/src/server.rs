use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use portico_auth::{
    AuthorizationService, AuthorizeEndpoint, CodeResponseTypeHandler, MemoryClientStorage,
    ResponseTypeDispatcher, authorize_router,
};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

pub struct PorticoServer {
    addr: SocketAddr,
    app: Router,
}

/// Builds the application router from configuration.
///
/// Seeds the in-memory client store from `cfg.clients` and mounts the
/// authorization endpoint with the authorization code handler.
pub fn build_app(cfg: &AppConfig) -> Result<Router, String> {
    let storage = MemoryClientStorage::with_clients(cfg.clients.iter().cloned())
        .map_err(|e| format!("client registration error: {e}"))?;
    tracing::info!(clients = storage.len(), "Client store seeded");

    let service = AuthorizationService::new(Arc::new(storage), cfg.authorize.clone());
    let dispatcher = ResponseTypeDispatcher::<()>::new().with_handler(CodeResponseTypeHandler::default());
    let endpoint = Arc::new(AuthorizeEndpoint::new(service, dispatcher));

    Ok(authorize_router(endpoint).layer(
        // Query strings carry state values; only the path is recorded.
        TraceLayer::new_for_http().make_span_with(|req: &axum::http::Request<_>| {
            tracing::info_span!(
                "http.request",
                method = %req.method(),
                path = %req.uri().path(),
            )
        }),
    ))
}

impl PorticoServer {
    pub fn from_config(cfg: &AppConfig) -> Result<Self, String> {
        Ok(Self {
            addr: cfg.addr(),
            app: build_app(cfg)?,
        })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
