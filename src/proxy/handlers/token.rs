use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::models::AccessToken;
use crate::error::ProxyResult;
use crate::state::AppState;

/// GET /fatsecret_token
pub async fn handle_token(State(state): State<Arc<AppState>>) -> ProxyResult<Json<AccessToken>> {
    let token = state.token_manager.get_valid_token().await?;
    Ok(Json(token))
}
