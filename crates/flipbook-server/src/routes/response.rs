//! Response envelopes and the API error type.
//!
//! Success: `{"status": "success", "data": {...}}`.
//! Failure: `{"status": "error", "message": "..."}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Wrap `data` in the success envelope.
pub fn success(data: serde_json::Value) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "success",
        "data": data,
    }))
}

/// Errors a handler can return; rendered as the error envelope.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized,
    NotFound(String),
    /// Details are logged, never sent to the client.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Access denied".to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(detail) => {
                error!("Request failed: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (
            status,
            Json(serde_json::json!({
                "status": "error",
                "message": message,
            })),
        )
            .into_response()
    }
}

impl From<flipbook_core::Error> for ApiError {
    fn from(e: flipbook_core::Error) -> Self {
        match e {
            flipbook_core::Error::InvalidRequest(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let (status, body) = render(ApiError::Internal("disk I/O error at page 7".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            serde_json::json!({ "status": "error", "message": GENERIC_ERROR_MESSAGE })
        );
    }

    #[tokio::test]
    async fn test_client_errors_keep_message() {
        let (status, body) = render(ApiError::NotFound("Brochure x not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Brochure x not found");

        let (status, body) = render(ApiError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_core_errors_map_to_status() {
        let invalid = ApiError::from(flipbook_core::Error::InvalidRequest("title is required".into()));
        let (status, body) = render(invalid).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "title is required");

        let db = ApiError::from(flipbook_core::Error::Database("locked".into()));
        let (status, body) = render(db).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_success_envelope() {
        let Json(body) = success(serde_json::json!({ "id": "abc" }));
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["id"], "abc");
    }
}
