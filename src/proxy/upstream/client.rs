use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

use crate::error::{ProxyError, ProxyResult};
use crate::proxy::common::utils::{preview, PREVIEW_CHARS};
use crate::proxy::common::Operation;

pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "application/octet-stream";

/// 上游原始响应 (状态码 + 文本)
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: String,
}

/// 待转发的图片
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// FatSecret server.api 客户端
pub struct UpstreamClient {
    http: reqwest::Client,
    api_url: String,
}

impl UpstreamClient {
    pub fn new(http: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
        }
    }

    /// 以 form-urlencoded 调用 server.api，自动附带 method 与 format=json
    pub async fn call_method(
        &self,
        operation: Operation,
        access_token: &str,
        params: &[(&str, &str)],
    ) -> ProxyResult<UpstreamResponse> {
        let mut form: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 2);
        if let Some(method) = operation.upstream_method() {
            form.push(("method", method));
        }
        form.extend_from_slice(params);
        form.push(("format", "json"));

        let request = self
            .http
            .post(&self.api_url)
            .bearer_auth(access_token)
            .form(&form);

        self.send(operation, request).await
    }

    /// 以 multipart/form-data 上传图片 (food.recognize)
    pub async fn call_multipart(
        &self,
        operation: Operation,
        access_token: &str,
        image: ImageUpload,
    ) -> ProxyResult<UpstreamResponse> {
        let size = image.data.len();
        let part = image_part(image).map_err(|e| ProxyError::transport(operation, &e))?;

        let mut form = Form::new();
        if let Some(method) = operation.upstream_method() {
            form = form.text("method", method);
        }
        let form = form.text("format", "json").part("image", part);

        tracing::debug!("Uploading {} bytes for {}", size, operation);

        let request = self
            .http
            .post(&self.api_url)
            .bearer_auth(access_token)
            .multipart(form);

        self.send(operation, request).await
    }

    async fn send(
        &self,
        operation: Operation,
        request: reqwest::RequestBuilder,
    ) -> ProxyResult<UpstreamResponse> {
        tracing::info!("Sending {} request to FatSecret", operation);

        let response = request.send().await.map_err(|e| {
            tracing::warn!("FatSecret {} request failed: {}", operation, e);
            ProxyError::transport(operation, &e)
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProxyError::transport(operation, &e))?;

        tracing::info!("FatSecret {} response status: {}", operation, status.as_u16());
        tracing::debug!(
            "FatSecret {} response preview: {}",
            operation,
            preview(&body, PREVIEW_CHARS)
        );

        Ok(UpstreamResponse { status, body })
    }
}

/// 构造图片 part，客户端给的 content type 不合法时退回 octet-stream
fn image_part(image: ImageUpload) -> reqwest::Result<Part> {
    let length = image.data.len() as u64;
    let part = Part::stream_with_length(image.data.clone(), length)
        .file_name(image.file_name.clone());
    match part.mime_str(&image.content_type) {
        Ok(part) => Ok(part),
        Err(e) => {
            tracing::warn!(
                "Invalid image content type {:?}, falling back to octet-stream: {}",
                image.content_type,
                e
            );
            Part::stream_with_length(image.data, length)
                .file_name(image.file_name)
                .mime_str(DEFAULT_IMAGE_CONTENT_TYPE)
        }
    }
}
