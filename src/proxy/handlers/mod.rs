// Handlers 模块 - API 端点处理器

pub mod barcode;
pub mod food;
pub mod image;
pub mod token;

pub use barcode::handle_barcode_lookup;
pub use food::{handle_food_details, handle_search};
pub use image::handle_image_recognition;
pub use token::handle_token;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ProxyError, ProxyResult};

/// 解析 JSON 请求体；空 body / 非对象一律视为没有收到数据
pub(crate) fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> ProxyResult<T> {
    let no_data = || ProxyError::Validation("No JSON data received".to_string());

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(no_data());
    }
    let value: Value = serde_json::from_slice(body).map_err(|_| no_data())?;
    if !value.is_object() {
        return Err(no_data());
    }
    serde_json::from_value(value).map_err(|_| no_data())
}

pub(crate) fn required(field: Option<String>, message: &str) -> ProxyResult<String> {
    field.ok_or_else(|| ProxyError::Validation(message.to_string()))
}
