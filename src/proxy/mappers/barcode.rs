//! food.find_id_for_barcode 响应映射
//!
//! 该接口即使查不到也返回 200，错误放在 body 的 `error` 对象里:
//! - 找到: `{"food_id": {"value": "4358009"}}`
//! - 未找到: `{"error": {"code": 106, "message": "No item found ..."}}`

use serde::Serialize;
use serde_json::Value;

use crate::error::{ProxyError, ProxyResult};
use crate::proxy::common::Operation;
use crate::proxy::mappers::parse_success;
use crate::proxy::upstream::UpstreamResponse;

/// FatSecret "Invalid ID / item not found" 错误码
pub const NOT_FOUND_ERROR_CODE: i64 = 106;

/// 名称不在此接口解析，客户端随后会调用 food details
pub const PLACEHOLDER_FOOD_NAME: &str = "Food Item (Details will be fetched)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarcodeMatch {
    pub food_id: Value,
    pub food_name: String,
}

pub fn map_barcode_lookup(response: UpstreamResponse) -> ProxyResult<BarcodeMatch> {
    let body = parse_success(Operation::BarcodeLookup, response)?;

    if let Some(error) = body.get("error").filter(|e| e.is_object()) {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Food not found for this barcode or API error.");

        // 依赖上游措辞的子串匹配，保持原样
        if error_code(error) == Some(NOT_FOUND_ERROR_CODE)
            || message.to_lowercase().contains("no item found")
        {
            return Err(ProxyError::NotFound(
                "Food not found for this barcode".to_string(),
            ));
        }

        return Err(ProxyError::UpstreamRejected {
            message: message.to_string(),
            details: error.clone(),
        });
    }

    if let Some(value) = body
        .get("food_id")
        .and_then(Value::as_object)
        .and_then(|food_id| food_id.get("value"))
    {
        return Ok(BarcodeMatch {
            food_id: value.clone(),
            food_name: PLACEHOLDER_FOOD_NAME.to_string(),
        });
    }

    tracing::warn!(
        "Unexpected response structure from food.find_id_for_barcode: {}",
        body
    );
    Err(ProxyError::NotFound(
        "Food not found or unexpected API response.".to_string(),
    ))
}

/// code 可能是数字也可能是数字字符串
fn error_code(error: &Value) -> Option<i64> {
    match error.get("code")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
