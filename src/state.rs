use crate::core::models::ProxyConfig;
use crate::proxy::upstream::UpstreamClient;
use crate::proxy::TokenManager;
use std::sync::Arc;
use std::time::Duration;

/// Web 应用状态
pub struct AppState {
    pub config: ProxyConfig,
    pub token_manager: Arc<TokenManager>,
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    pub fn new(config: ProxyConfig) -> Result<Self, String> {
        config.validate()?;

        // token 请求与 API 请求共用一个连接池
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;

        let token_manager = Arc::new(TokenManager::new(http.clone(), &config));
        let upstream = Arc::new(UpstreamClient::new(http, config.api_url.clone()));

        Ok(Self {
            config,
            token_manager,
            upstream,
        })
    }
}
