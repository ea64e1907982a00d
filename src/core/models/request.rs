//! 客户端请求模型
//!
//! 移动端发来的字段类型并不严格 (有时是数字, 有时是字符串),
//! 这里统一收敛为 `Option<String>`，空字符串视为缺失。

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub page_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub max_results: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodDetailsRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub food_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BarcodeRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub barcode: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_request_accepts_numbers() {
        let req: SearchRequest =
            serde_json::from_value(json!({"query": "apple", "page_number": 2, "max_results": "25"}))
                .unwrap();
        assert_eq!(req.query.as_deref(), Some("apple"));
        assert_eq!(req.page_number.as_deref(), Some("2"));
        assert_eq!(req.max_results.as_deref(), Some("25"));
    }

    #[test]
    fn test_empty_and_odd_values_are_absent() {
        let req: SearchRequest =
            serde_json::from_value(json!({"query": "", "page_number": null, "max_results": [1]}))
                .unwrap();
        assert!(req.query.is_none());
        assert!(req.page_number.is_none());
        assert!(req.max_results.is_none());

        let req: BarcodeRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.barcode.is_none());
    }

    #[test]
    fn test_numeric_food_id() {
        let req: FoodDetailsRequest = serde_json::from_value(json!({"food_id": 33691})).unwrap();
        assert_eq!(req.food_id.as_deref(), Some("33691"));
    }
}
