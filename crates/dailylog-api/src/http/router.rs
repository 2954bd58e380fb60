//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.
//!
//! When the filesystem storage backend is active, stored thumbnails are
//! served from `/static`; with R2 the permanent URLs point at the bucket's
//! public domain and no static route is mounted.

use axum::Router;
use axum::routing::{delete, get, patch, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Chat
        .route(
            "/chat/current-session",
            get(handlers::chat::current_session).delete(handlers::chat::end_current_session),
        )
        .route("/chat/message", post(handlers::chat::send_message))
        // Diary
        .route(
            "/diary",
            post(handlers::diary::finalize).get(handlers::diary::get_by_date),
        )
        .route("/diary/direct", post(handlers::diary::write_direct))
        .route("/diaries", get(handlers::diary::list))
        .route("/diary/{id}", get(handlers::diary::get_by_id))
        .route("/diary/{id}", put(handlers::diary::update))
        .route("/diary/{id}", delete(handlers::diary::delete))
        .route("/diary/{id}/chat_session", get(handlers::diary::chat_session))
        .route("/diary/{id}/next_prev", get(handlers::diary::next_prev))
        // Thumbnails
        .route("/diary/thumbnail/{id}", get(handlers::thumbnail::generate))
        .route("/diary/{id}/thumbnail", patch(handlers::thumbnail::attach));

    let static_dir = state.static_dir.clone();

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if let Some(dir) = static_dir {
        router = router.nest_service("/static", ServeDir::new(&dir));
        tracing::info!(path = %dir.display(), "Static thumbnail serving enabled");
    }

    router
}

/// GET /health - Simple health check endpoint (no identity required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
