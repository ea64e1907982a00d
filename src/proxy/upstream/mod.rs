// 上游客户端

pub mod client;

pub use client::{ImageUpload, UpstreamClient, UpstreamResponse};
