use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Placeholder payload rendered as `{}`.
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
pub struct Empty {}

/// Error payload: one message, or one message per failing field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorDetail {
    Single(String),
    Many(Vec<String>),
}

/// Uniform response envelope returned by every endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: None,
            error: None,
            message: None,
        }
    }

    pub fn listed(data: T, count: usize) -> Self {
        Self {
            count: Some(count),
            ..Self::success(data)
        }
    }

    pub fn failure(error: ErrorDetail) -> Self {
        Self {
            success: false,
            data: None,
            count: None,
            error: Some(error),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_omits_absent_fields() {
        let body = serde_json::to_value(ApiResponse::success(Empty {})).unwrap();
        assert_eq!(body, json!({ "success": true, "data": {} }));
    }

    #[test]
    fn listed_carries_count() {
        let body = serde_json::to_value(ApiResponse::listed(vec![1, 2, 3], 3)).unwrap();
        assert_eq!(body, json!({ "success": true, "data": [1, 2, 3], "count": 3 }));
    }

    #[test]
    fn failure_renders_single_or_many_errors() {
        let single = ApiResponse::<Empty>::failure(ErrorDetail::Single("Order not found".into()));
        assert_eq!(
            serde_json::to_value(single).unwrap(),
            json!({ "success": false, "error": "Order not found" })
        );

        let many = ApiResponse::<Empty>::failure(ErrorDetail::Many(vec![
            "Name is required".into(),
            "Email is required".into(),
        ]));
        assert_eq!(
            serde_json::to_value(many).unwrap(),
            json!({ "success": false, "error": ["Name is required", "Email is required"] })
        );
    }

    #[test]
    fn message_is_attached() {
        let body = ApiResponse::success(Empty {}).with_message("All customers deleted successfully");
        let body = serde_json::to_value(body).unwrap();
        assert_eq!(body["message"], "All customers deleted successfully");
        assert_eq!(body["data"], json!({}));
    }
}
