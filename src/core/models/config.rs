//! 代理服务配置

use std::fmt;

pub const DEFAULT_TOKEN_URL: &str = "https://oauth.fatsecret.com/connect/token";
pub const DEFAULT_API_URL: &str = "https://platform.fatsecret.com/rest/server.api";
pub const DEFAULT_SCOPE: &str = "basic barcode";

const MIB: usize = 1024 * 1024;

/// 图片上传上限的硬顶 (1 GiB)
const MAX_UPLOAD_CEILING: usize = 1024 * MIB;

/// 反代服务配置
#[derive(Clone)]
pub struct ProxyConfig {
    /// 监听地址
    pub bind_address: String,

    /// 监听端口
    pub port: u16,

    /// FatSecret OAuth2 client id
    pub client_id: String,

    /// FatSecret OAuth2 client secret
    pub client_secret: String,

    /// Token 端点
    pub token_url: String,

    /// REST API 端点 (server.api)
    pub api_url: String,

    /// client_credentials 申请的 scope
    pub scope: String,

    /// 上游请求超时时间(秒)
    pub request_timeout: u64,

    /// 图片上传大小上限(字节)
    pub max_upload_bytes: usize,
}

impl ProxyConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5001,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            request_timeout: default_request_timeout(),
            max_upload_bytes: 10 * MIB,
        }
    }

    /// 按 MiB 设置上传上限，溢出时饱和，交给 validate 拒绝
    pub fn set_max_upload_mb(&mut self, mb: usize) {
        self.max_upload_bytes = mb.saturating_mul(MIB);
    }

    /// 启动前校验配置
    pub fn validate(&self) -> Result<(), String> {
        if self.client_id.trim().is_empty() {
            return Err("FATSECRET_CLIENT_ID is empty".to_string());
        }
        if self.client_secret.trim().is_empty() {
            return Err("FATSECRET_CLIENT_SECRET is empty".to_string());
        }
        for (name, value) in [("token_url", &self.token_url), ("api_url", &self.api_url)] {
            let parsed =
                url::Url::parse(value).map_err(|e| format!("Invalid {}: {} ({})", name, value, e))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(format!("Invalid {}: unsupported scheme {}", name, parsed.scheme()));
            }
        }
        if self.request_timeout == 0 {
            return Err("request_timeout must be greater than 0".to_string());
        }
        if self.max_upload_bytes == 0 || self.max_upload_bytes > MAX_UPLOAD_CEILING {
            return Err(format!(
                "max_upload_bytes must be between 1 and {} (got {})",
                MAX_UPLOAD_CEILING, self.max_upload_bytes
            ));
        }
        Ok(())
    }
}

// client_secret 不进日志
impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("bind_address", &self.bind_address)
            .field("port", &self.port)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("token_url", &self.token_url)
            .field("api_url", &self.api_url)
            .field("scope", &self.scope)
            .field("request_timeout", &self.request_timeout)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

fn default_request_timeout() -> u64 {
    30 // 默认 30 秒
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_fatsecret() {
        let config = ProxyConfig::new("id", "secret");
        assert_eq!(config.port, 5001);
        assert_eq!(config.scope, "basic barcode");
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_credentials() {
        let config = ProxyConfig::new("", "secret");
        assert!(config.validate().unwrap_err().contains("CLIENT_ID"));

        let config = ProxyConfig::new("id", "  ");
        assert!(config.validate().unwrap_err().contains("CLIENT_SECRET"));
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let mut config = ProxyConfig::new("id", "secret");
        config.api_url = "not a url".to_string();
        assert!(config.validate().unwrap_err().contains("api_url"));

        let mut config = ProxyConfig::new("id", "secret");
        config.token_url = "ftp://oauth.example.com/token".to_string();
        assert!(config.validate().unwrap_err().contains("scheme"));
    }

    #[test]
    fn test_upload_limit_is_bounded() {
        let mut config = ProxyConfig::new("id", "secret");
        config.set_max_upload_mb(25);
        assert_eq!(config.max_upload_bytes, 25 * 1024 * 1024);
        assert!(config.validate().is_ok());

        config.set_max_upload_mb(usize::MAX);
        assert_eq!(config.max_upload_bytes, usize::MAX);
        assert!(config.validate().unwrap_err().contains("max_upload_bytes"));

        config.set_max_upload_mb(0);
        assert!(config.validate().unwrap_err().contains("max_upload_bytes"));

        config.set_max_upload_mb(1024);
        assert!(config.validate().is_ok());
        config.set_max_upload_mb(1025);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = ProxyConfig::new("id", "super-secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("***"));
    }
}
