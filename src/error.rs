use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::proxy::common::Operation;

#[derive(Error, Debug)]
pub enum ProxyError {
    /// 客户端请求缺少必填字段
    #[error("{0}")]
    Validation(String),

    /// token 端点返回非 200
    #[error("FatSecret token request failed: {status}")]
    UpstreamAuth { status: u16, details: String },

    /// barcode 接口的严格 token 校验失败
    #[error("Failed to refresh token for {operation}")]
    TokenRefresh {
        operation: Operation,
        status: StatusCode,
        details: Value,
    },

    /// server.api 返回非 200
    #[error("{}", api_status_message(.operation, .status))]
    UpstreamApi {
        operation: Operation,
        status: StatusCode,
        details: String,
    },

    /// 200 响应中内嵌的 error 对象
    #[error("{message}")]
    UpstreamRejected { message: String, details: Value },

    #[error("{0}")]
    NotFound(String),

    /// 上传超过 MAX_UPLOAD_MB
    #[error("Image file too large")]
    PayloadTooLarge { limit: usize },

    #[error("{}", parse_message(.operation))]
    Parse {
        operation: Operation,
        details: String,
        raw: String,
    },

    #[error("Exception during FatSecret {operation} request")]
    Transport {
        operation: Operation,
        details: String,
    },
}

// barcode 沿用旧客户端依赖的文案
fn api_status_message(operation: &Operation, status: &StatusCode) -> String {
    match operation {
        Operation::BarcodeLookup => {
            format!("FatSecret API (barcode) returned status {}", status.as_u16())
        }
        _ => format!("FatSecret API returned status {}", status.as_u16()),
    }
}

fn parse_message(operation: &Operation) -> String {
    match operation {
        Operation::BarcodeLookup => format!("Failed to parse FatSecret {} response", operation),
        _ => format!("Failed to parse FatSecret {} response as JSON", operation),
    }
}

/// 统一错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Validation(_)
            | ProxyError::UpstreamAuth { .. }
            | ProxyError::UpstreamRejected { .. } => StatusCode::BAD_REQUEST,
            ProxyError::TokenRefresh { status, .. } | ProxyError::UpstreamApi { status, .. } => {
                *status
            }
            ProxyError::NotFound(_) => StatusCode::NOT_FOUND,
            ProxyError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::Parse { .. } | ProxyError::Transport { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn details(&self) -> Option<Value> {
        match self {
            ProxyError::Validation(_) | ProxyError::NotFound(_) => None,
            ProxyError::PayloadTooLarge { limit } => Some(Value::String(format!(
                "Upload exceeds the {} byte limit",
                limit
            ))),
            ProxyError::UpstreamAuth { details, .. }
            | ProxyError::UpstreamApi { details, .. }
            | ProxyError::Parse { details, .. }
            | ProxyError::Transport { details, .. } => Some(Value::String(details.clone())),
            ProxyError::TokenRefresh { details, .. }
            | ProxyError::UpstreamRejected { details, .. } => Some(details.clone()),
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        let response = match self {
            ProxyError::Parse { raw, .. } => Some(raw.clone()),
            _ => None,
        };
        ErrorBody {
            error: self.to_string(),
            details: self.details(),
            response,
        }
    }

    pub fn transport(operation: Operation, error: &reqwest::Error) -> Self {
        ProxyError::Transport {
            operation,
            details: crate::proxy::mappers::describe_transport_error(error),
        }
    }

    pub fn parse(operation: Operation, error: &serde_json::Error, raw: String) -> Self {
        ProxyError::Parse {
            operation,
            details: error.to_string(),
            raw,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{} ({}): {:?}", self, status, self.details());
        } else {
            tracing::warn!("{} ({})", self, status);
        }
        (status, Json(self.to_body())).into_response()
    }
}

pub type ProxyResult<T> = Result<T, ProxyError>;
