use axum::Json;
use serde::Serialize;

/// Body shared by every endpoint: `{ success, message?, data? }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
            data: Some(data),
        })
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        })
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.into()),
            data: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn omits_empty_fields() {
        let Json(body) = ApiResponse::message("Space deleted successfully");
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({ "success": true, "message": "Space deleted successfully" })
        );

        let Json(body) = ApiResponse::data(vec![1, 2]);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({ "success": true, "data": [1, 2] })
        );
    }
}
