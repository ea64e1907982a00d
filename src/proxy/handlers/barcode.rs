// 条形码查询 Handler
use axum::{extract::State, Json};
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;

use super::{parse_json_body, required};
use crate::core::models::{AccessToken, BarcodeRequest};
use crate::error::{ProxyError, ProxyResult};
use crate::proxy::mappers::{map_barcode_lookup, BarcodeMatch};
use crate::proxy::{Operation, TokenManager};
use crate::state::AppState;

/// POST /fatsecret_barcode_lookup
pub async fn handle_barcode_lookup(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ProxyResult<Json<BarcodeMatch>> {
    let req: BarcodeRequest = parse_json_body(&body)?;
    let barcode = required(req.barcode, "No barcode provided")?;

    let token = strict_token(&state.token_manager).await?;

    tracing::info!("Looking up FatSecret food for barcode: {}", barcode);
    let response = state
        .upstream
        .call_method(
            Operation::BarcodeLookup,
            &token.access_token,
            &[("barcode", barcode.as_str())],
        )
        .await?;

    Ok(Json(map_barcode_lookup(response)?))
}

/// 条形码接口对 token 失败做额外包装: 统一报
/// "Failed to refresh token for barcode lookup"，保留原状态码与 details
/// (空 access_token 已在 TokenManager 中按解析失败处理)
async fn strict_token(token_manager: &TokenManager) -> ProxyResult<AccessToken> {
    token_manager.get_valid_token().await.map_err(|e| {
        tracing::error!("Failed to refresh token for barcode lookup: {}", e);
        ProxyError::TokenRefresh {
            operation: Operation::BarcodeLookup,
            status: e.status(),
            details: e
                .details()
                .unwrap_or_else(|| Value::String("Unknown token error".to_string())),
        }
    })
}
