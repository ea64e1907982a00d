// 错误分类模块 - 将 reqwest 底层错误转换为可读的 details
use reqwest::Error;

/// 分类上游传输错误
///
/// 返回值: (错误类型, 英文错误消息)
/// - 错误类型: 用于日志
/// - 英文消息: 拼进返回给客户端的 details
pub fn classify_transport_error(error: &Error) -> (&'static str, &'static str) {
    if error.is_timeout() {
        (
            "timeout_error",
            "Request to FatSecret timed out",
        )
    } else if error.is_connect() {
        (
            "connection_error",
            "Could not connect to FatSecret",
        )
    } else if error.is_decode() || error.is_body() {
        (
            "body_error",
            "Connection interrupted while reading the FatSecret response",
        )
    } else if error.is_builder() || error.is_request() {
        (
            "request_error",
            "Failed to send request to FatSecret",
        )
    } else {
        (
            "unknown_error",
            "Unknown error occurred",
        )
    }
}

/// 组装 details: "<分类消息>: <原始错误>"
pub fn describe_transport_error(error: &Error) -> String {
    let (kind, message) = classify_transport_error(error);
    tracing::debug!("Classified upstream transport error as {}", kind);
    format!("{}: {}", message, error)
}
