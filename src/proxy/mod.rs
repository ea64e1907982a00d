// proxy 模块 - FatSecret 反代服务

pub mod common;
pub mod handlers; // API 端点处理器
pub mod mappers; // 响应转换
pub mod token_manager;
pub mod upstream; // 上游客户端

pub use common::Operation;
pub use token_manager::TokenManager;
