// 图片识别 Handler
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::error::{ProxyError, ProxyResult};
use crate::proxy::mappers::parse_success;
use crate::proxy::upstream::client::DEFAULT_IMAGE_CONTENT_TYPE;
use crate::proxy::upstream::ImageUpload;
use crate::proxy::Operation;
use crate::state::AppState;

const IMAGE_FIELD: &str = "image";

/// POST /fatsecret_image_recognition
pub async fn handle_image_recognition(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ProxyResult<Json<Value>> {
    // 非 multipart 请求同样按 "没有图片" 处理
    let multipart = multipart.map_err(|e| {
        tracing::debug!("Rejected non-multipart image upload: {}", e);
        missing_image()
    })?;
    let image = read_image(multipart, state.config.max_upload_bytes).await?;

    let token = state.token_manager.get_valid_token().await?;

    tracing::info!(
        "Sending image recognition request to FatSecret ({}, {} bytes)",
        image.file_name,
        image.data.len()
    );
    let response = state
        .upstream
        .call_multipart(Operation::ImageRecognition, &token.access_token, image)
        .await?;

    Ok(Json(parse_success(Operation::ImageRecognition, response)?))
}

/// 取出名为 image 的文件字段; 没有 filename 的同名字段不算文件
async fn read_image(mut multipart: Multipart, limit: usize) -> ProxyResult<ImageUpload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, limit))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if file_name.is_empty() {
            return Err(ProxyError::Validation("Empty image file".to_string()));
        }
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_IMAGE_CONTENT_TYPE)
            .to_string();
        let data = field.bytes().await.map_err(|e| upload_error(e, limit))?;

        return Ok(ImageUpload {
            file_name,
            content_type,
            data,
        });
    }

    Err(missing_image())
}

/// 超过 DefaultBodyLimit 时 multer 报 413，其余按请求格式错误处理
fn upload_error(error: MultipartError, limit: usize) -> ProxyError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!("Image upload exceeds {} bytes", limit);
        return ProxyError::PayloadTooLarge { limit };
    }
    ProxyError::Validation(format!("Invalid multipart body: {}", error.body_text()))
}

fn missing_image() -> ProxyError {
    ProxyError::Validation("No image file provided".to_string())
}
