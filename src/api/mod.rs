use crate::proxy::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod common;

/// 构建 API 路由
pub fn build_routes(state: Arc<AppState>) -> Router {
    let max_upload = state.config.max_upload_bytes;

    Router::new()
        // Token
        .route("/fatsecret_token", get(handlers::handle_token))
        // Foods
        .route("/fatsecret_search", post(handlers::handle_search))
        .route("/fatsecret_food_details", post(handlers::handle_food_details))
        .route(
            "/fatsecret_image_recognition",
            post(handlers::handle_image_recognition).layer(DefaultBodyLimit::max(max_upload)),
        )
        .route(
            "/fatsecret_barcode_lookup",
            post(handlers::handle_barcode_lookup),
        )
        // Health
        .route("/healthz", get(common::health_check))
        .with_state(state)
}

/// 完整应用: 路由 + CORS + 请求日志
pub fn build_app(state: Arc<AppState>) -> Router {
    build_routes(state)
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(common::request_logger))
}
