use chrono::Utc;
use reqwest::StatusCode;
use tokio::sync::Mutex;

use crate::core::models::{AccessToken, CachedToken, ProxyConfig, TokenResponse};
use crate::error::{ProxyError, ProxyResult};
use crate::proxy::common::utils::{mask_token, preview, PREVIEW_CHARS};
use crate::proxy::common::Operation;

/// FatSecret client_credentials token 管理器
///
/// 进程内只缓存一个 token。锁在刷新期间一直持有，
/// 同时到达的请求只会触发一次 token 请求。
pub struct TokenManager {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    scope: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenManager {
    /// 创建新的 TokenManager
    pub fn new(http: reqwest::Client, config: &ProxyConfig) -> Self {
        Self {
            http,
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            scope: config.scope.clone(),
            cached: Mutex::new(None),
        }
    }

    /// 获取可用的 token，缓存过期或不存在时刷新
    pub async fn get_valid_token(&self) -> ProxyResult<AccessToken> {
        let mut cached = self.cached.lock().await;

        let now = Utc::now();
        if let Some(token) = cached.as_ref() {
            if token.is_valid_at(now) {
                return Ok(token.to_access_token(now));
            }
            tracing::info!("Cached FatSecret token expired at {}, refreshing", token.expires_at);
        }

        let grant = self.request_token().await?;
        let now = Utc::now();
        tracing::info!(
            "FatSecret token refreshed: {} (type: {}, scope: {}), expires in {}s",
            mask_token(&grant.access_token),
            grant.token_type.as_deref().unwrap_or("-"),
            grant.scope.as_deref().unwrap_or("-"),
            grant.expires_in
        );
        let token = CachedToken::issued_at(grant.access_token, grant.expires_in, now);

        let access = AccessToken {
            access_token: token.value.clone(),
            expires_in: grant.expires_in,
        };
        *cached = Some(token);
        Ok(access)
    }

    /// 当前缓存的 token 快照
    pub async fn cached_token(&self) -> Option<CachedToken> {
        self.cached.lock().await.clone()
    }

    async fn request_token(&self) -> ProxyResult<TokenResponse> {
        let params = [("grant_type", "client_credentials"), ("scope", self.scope.as_str())];

        tracing::debug!("Requesting FatSecret token from {}", self.token_url);

        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&params)
            .send()
            .await
            .map_err(|e| ProxyError::transport(Operation::Token, &e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProxyError::transport(Operation::Token, &e))?;

        if status != StatusCode::OK {
            let details = extract_auth_error(&text);
            tracing::warn!(
                "FatSecret token request failed with status {}: {}",
                status.as_u16(),
                preview(&details, PREVIEW_CHARS)
            );
            return Err(ProxyError::UpstreamAuth {
                status: status.as_u16(),
                details,
            });
        }

        let grant = serde_json::from_str::<TokenResponse>(&text)
            .map_err(|e| ProxyError::parse(Operation::Token, &e, text.clone()))?;

        // 空 token 不能进缓存
        if grant.access_token.trim().is_empty() {
            tracing::warn!("FatSecret token response carried an empty access_token");
            return Err(ProxyError::Parse {
                operation: Operation::Token,
                details: "access_token is empty".to_string(),
                raw: text,
            });
        }

        Ok(grant)
    }
}

/// 从 OAuth 错误体中取可读信息: error_description > error > 原文
pub fn extract_auth_error(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };
    ["error_description", "error"]
        .iter()
        .find_map(|key| json.get(*key))
        .map(|v| match v.as_str() {
            Some(s) => s.to_string(),
            None => v.to_string(),
        })
        .unwrap_or_else(|| body.to_string())
}
