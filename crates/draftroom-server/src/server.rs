// Router assembly and the listening loop.

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use draftroom_core::DraftService;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::routes::{draft_routes, health_routes};

/// Combine every route with CORS and request tracing.
pub fn build_router(service: Arc<DraftService>, config: &Config) -> Router {
    Router::new()
        .merge(health_routes(service.clone()))
        .nest("/api", draft_routes(service))
        .layer(cors_layer(&config.cors.origins))
        .layer(TraceLayer::new_for_http())
}

/// Any origin when none are configured, otherwise exactly the listed ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Bind the configured address and serve until `shutdown` resolves.
pub async fn run<F>(config: &Config, service: Arc<DraftService>, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Draft server listening on {}", listener.local_addr()?);

    axum::serve(listener, build_router(service, config))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;

    info!("Draft server stopped");
    Ok(())
}
