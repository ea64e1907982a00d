//! 核心数据模型

mod config;
mod request;
mod token;

pub use config::{ProxyConfig, DEFAULT_API_URL, DEFAULT_SCOPE, DEFAULT_TOKEN_URL};
pub use request::{BarcodeRequest, FoodDetailsRequest, SearchRequest};
pub use token::{AccessToken, CachedToken, TokenResponse};
