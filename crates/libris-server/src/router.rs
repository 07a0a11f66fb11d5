use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all libris endpoints.
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_upload_size;
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/v1/auth/register", post(handler::register_handler))
        .route("/v1/auth/login", post(handler::login_handler))
        .route("/v1/auth/logout", post(handler::logout_handler))
        .route(
            "/v1/books",
            get(handler::list_books).post(handler::add_book),
        )
        .route("/v1/books/search", get(handler::search_books))
        .route("/v1/books/:book", delete(handler::remove_book))
        .route("/v1/books/:book/pdf", get(handler::download_pdf))
        .route("/v1/books/:book/reader", post(handler::toggle_reader))
        .route("/v1/share", get(handler::share_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
