//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`  - Health check (public)
//! - `/api/*`       - REST API (Bearer token resolved once per request)
//! - `/media/*`     - Uploaded recipe pictures
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer token resolution on `/api`
//! - **Path normalization** - Trailing slash handling, so Django-style
//!   clients calling `/api/recipes/` land on `/api/recipes`

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let api_router = api::routes::api_routes()
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::identify,
        ));

    let api_router = if behind_proxy {
        api_router.layer(rate_limit::proxied_layer())
    } else {
        api_router.layer(rate_limit::layer())
    };

    let media_dir = state.media_root.as_ref().clone();

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .nest_service("/media", ServeDir::new(media_dir))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
