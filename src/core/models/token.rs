use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Token 端点响应 (client_credentials)
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// expires_in 上限 (一年)，避免异常值导致时间溢出
const MAX_LIFETIME_SECS: i64 = 365 * 24 * 3600;

/// 进程内缓存的 bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// 以 `now` 为起点计算过期时间，负数按 0 处理
    pub fn issued_at(value: String, expires_in: i64, now: DateTime<Utc>) -> Self {
        let lifetime = Duration::seconds(expires_in.clamp(0, MAX_LIFETIME_SECS));
        Self {
            value,
            expires_at: now + lifetime,
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }

    pub fn to_access_token(&self, now: DateTime<Utc>) -> AccessToken {
        AccessToken {
            access_token: self.value.clone(),
            expires_in: self.remaining_seconds(now),
        }
    }
}

/// 对外暴露的 token (同时也是 /fatsecret_token 的响应体)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_in: i64,
}
