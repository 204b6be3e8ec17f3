// file: src/server/mod.rs
// description: HTTP server assembly and startup
// reference: https://docs.rs/axum

pub mod auth;
pub mod captcha;
pub mod pages;
pub mod routes;
pub mod session;
pub mod state;

pub use auth::{AdminCredentials, hash_password};
pub use session::{SESSION_COOKIE, SessionStore};
pub use state::AppState;

use crate::config::ServerConfig;
use crate::error::Result;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn build_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let app = Router::new()
        .merge(routes::captcha_routes())
        .merge(routes::chat_routes())
        .merge(routes::admin_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.permissive_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Serve until the process is stopped.
pub async fn run(state: AppState, config: &ServerConfig) -> Result<()> {
    let app = build_router(Arc::new(state), config);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
