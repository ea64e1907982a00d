use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{ProxyError, ProxyResult};
use crate::proxy::common::Operation;
use crate::proxy::upstream::UpstreamResponse;

/// 非 200 映射为 UpstreamApi，200 则解析为 JSON 原样返回
pub fn parse_success(operation: Operation, response: UpstreamResponse) -> ProxyResult<Value> {
    if response.status != StatusCode::OK {
        return Err(ProxyError::UpstreamApi {
            operation,
            status: response.status,
            details: response.body,
        });
    }

    serde_json::from_str::<Value>(&response.body).map_err(|e| {
        tracing::error!(
            "Failed to parse FatSecret {} response: {}. Raw response: {}",
            operation,
            e,
            response.body
        );
        ProxyError::parse(operation, &e, response.body.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upstream(status: u16, body: &str) -> UpstreamResponse {
        UpstreamResponse {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_passthrough_returns_body() {
        let body = r#"{"foods":{"food":[{"food_id":"33691","food_name":"Apple"}],"total_results":"1"}}"#;
        let value = parse_success(Operation::Search, upstream(200, body)).unwrap();
        assert_eq!(value["foods"]["food"][0]["food_name"], "Apple");
        assert_eq!(value, serde_json::from_str::<Value>(body).unwrap());
    }

    #[test]
    fn test_non_200_keeps_status_and_raw_body() {
        let err = parse_success(Operation::FoodDetails, upstream(502, "Bad Gateway")).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.details(), Some(json!("Bad Gateway")));
    }

    #[test]
    fn test_201_is_not_success() {
        let err = parse_success(Operation::Search, upstream(201, "{}")).unwrap_err();
        assert_eq!(err.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = parse_success(Operation::ImageRecognition, upstream(200, "<html>oops</html>"))
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        match err {
            ProxyError::Parse { operation, raw, .. } => {
                assert_eq!(operation, Operation::ImageRecognition);
                assert_eq!(raw, "<html>oops</html>");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
