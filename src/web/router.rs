//! Router configuration for the Quill web layer.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    auth_page, home, login, logout, not_found, post_create, post_edit, profile, register, session,
    AppState,
};
use super::middleware::{create_cors_layer, route_guard};

/// Create the main router: pages plus the auth API, all behind the route
/// guard.
///
/// The guard is layered on the whole router (the fallback included) so
/// every incoming path is classified, routed or not; protected paths with
/// no handler still redirect signed-out visitors instead of leaking a 404.
pub fn create_router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let page_routes = Router::new()
        .route("/", get(home))
        .route("/auth", get(auth_page))
        .route("/profile", get(profile))
        .route("/post/create", get(post_create))
        .route("/post/edit/:id", get(post_edit));

    // Auth API routes resolve sessions themselves; the guard never
    // classifies /api paths as protected
    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(session));

    Router::new()
        .merge(page_routes)
        .nest("/api/auth", auth_routes)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn_with_state(state.clone(), route_guard)),
        )
        .with_state(state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
