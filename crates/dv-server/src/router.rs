use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all DeltaVision endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/api/app-info", get(handler::app_info_handler))
        .route("/api/compare-directories", post(handler::compare_directories_handler))
        .route("/api/compare-files", post(handler::compare_files_handler))
        .route("/api/search-files", post(handler::search_files_handler))
        .route("/api/read-file-content", post(handler::read_file_content_handler))
        .route("/api/parse-keywords-file", post(handler::parse_keywords_file_handler))
        .route("/api/stream-files", get(handler::stream_files_handler))
        .route("/api/stream-file-content", get(handler::stream_file_content_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
