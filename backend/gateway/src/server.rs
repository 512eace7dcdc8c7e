//! Router construction and the HTTP serve loop.

use anyhow::Result;
use axum::{middleware as axum_mw, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use folio_core::AccessGate;

use crate::handlers;
use crate::middleware::access_gate;

/// Application state shared across routes and the gate middleware.
#[derive(Clone)]
pub struct GatewayState {
    pub gate: Arc<AccessGate>,
    /// Cookie the session credential is read from.
    pub cookie_name: String,
}

/// Build the full axum router with the access gate layered in front of
/// every route.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        // Public marketing pages
        .route("/", get(handlers::home))
        .route("/about", get(handlers::about))
        .route("/projects", get(handlers::projects))
        // Redirect targets
        .route("/login", get(handlers::login))
        .route("/unauthorized", get(handlers::unauthorized))
        // Authenticated area
        .route("/dashboard", get(handlers::dashboard))
        // Admin area
        .route("/admin", get(handlers::admin_panel))
        .route("/api/admin/projects", get(handlers::admin_projects))
        // Liveness
        .route("/api/health", get(handlers::health))
        // The gate must run before any handler; axum layers apply
        // outermost-last, so this wraps everything above.
        .layer(axum_mw::from_fn_with_state(state, access_gate))
}

/// Bind and serve until shutdown.
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = build_router(state);

    info!("Gateway HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
