//! 核心模块
//! 配置、token 与请求模型

pub mod models;
