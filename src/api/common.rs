use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// 记录每个请求的方法、路径、状态码与耗时
pub async fn request_logger(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let latency_ms = start.elapsed().as_millis();
    if status.is_server_error() {
        tracing::warn!("{} {} - status: {}, latency: {}ms", method, path, status, latency_ms);
    } else {
        tracing::info!("{} {} - status: {}, latency: {}ms", method, path, status, latency_ms);
    }
    response
}

pub async fn health_check() -> &'static str {
    "ok"
}
