// 食物搜索 / 详情 Handler
use axum::{extract::State, Json};
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;

use super::{parse_json_body, required};
use crate::core::models::{FoodDetailsRequest, SearchRequest};
use crate::error::ProxyResult;
use crate::proxy::mappers::parse_success;
use crate::proxy::Operation;
use crate::state::AppState;

const DEFAULT_PAGE_NUMBER: &str = "0";
const DEFAULT_MAX_RESULTS: &str = "10";

/// POST /fatsecret_search
pub async fn handle_search(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ProxyResult<Json<Value>> {
    let req: SearchRequest = parse_json_body(&body)?;
    let query = required(req.query, "No search query provided")?;
    let page_number = req
        .page_number
        .unwrap_or_else(|| DEFAULT_PAGE_NUMBER.to_string());
    let max_results = req
        .max_results
        .unwrap_or_else(|| DEFAULT_MAX_RESULTS.to_string());

    let token = state.token_manager.get_valid_token().await?;

    tracing::info!("Searching FatSecret foods with query: {}", query);
    let response = state
        .upstream
        .call_method(
            Operation::Search,
            &token.access_token,
            &[
                ("search_expression", query.as_str()),
                ("page_number", page_number.as_str()),
                ("max_results", max_results.as_str()),
            ],
        )
        .await?;

    Ok(Json(parse_success(Operation::Search, response)?))
}

/// POST /fatsecret_food_details
pub async fn handle_food_details(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ProxyResult<Json<Value>> {
    let req: FoodDetailsRequest = parse_json_body(&body)?;
    let food_id = required(req.food_id, "No food ID provided")?;

    let token = state.token_manager.get_valid_token().await?;

    tracing::info!("Fetching FatSecret food details for food ID: {}", food_id);
    let response = state
        .upstream
        .call_method(
            Operation::FoodDetails,
            &token.access_token,
            &[("food_id", food_id.as_str())],
        )
        .await?;

    Ok(Json(parse_success(Operation::FoodDetails, response)?))
}
