// 公共工具

pub mod utils;

use std::fmt;

/// 代理的上游操作，用于日志与错误文案
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Token,
    Search,
    FoodDetails,
    ImageRecognition,
    BarcodeLookup,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Operation::Token => "token",
            Operation::Search => "search",
            Operation::FoodDetails => "food details",
            Operation::ImageRecognition => "image recognition",
            Operation::BarcodeLookup => "barcode lookup",
        }
    }

    /// server.api 的 `method` 参数
    pub fn upstream_method(self) -> Option<&'static str> {
        match self {
            Operation::Token => None,
            Operation::Search => Some("foods.search"),
            Operation::FoodDetails => Some("food.get.v2"),
            Operation::ImageRecognition => Some("food.recognize"),
            Operation::BarcodeLookup => Some("food.find_id_for_barcode"),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
