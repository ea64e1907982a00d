// Mappers 模块 - 上游响应到对外 JSON 契约的转换

pub mod barcode;
pub mod error_classifier;
pub mod response;

pub use barcode::{map_barcode_lookup, BarcodeMatch};
pub use error_classifier::{classify_transport_error, describe_transport_error};
pub use response::parse_success;
