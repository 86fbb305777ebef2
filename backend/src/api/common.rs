//! Response envelope and error handling utilities for API endpoints.
//!
//! Every endpoint, success or failure, answers with the same JSON shape:
//!
//! ```json
//! {"statusCode": 200, "success": true, "data": {...}, "message": "..."}
//! ```
//!
//! The HTTP status is mirrored in the body. Failures flow through a single
//! adapter, [`service_error_to_http`], which maps the service-layer error
//! kind to a transport status and a `success:false` envelope.

use crate::errors::ServiceError;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// HTTP status mirrored into the body
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Create a successful 200 response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            success: true,
            data: Some(data),
            message: message.into(),
        }
    }

    /// Create a successful 201 response
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::CREATED.as_u16(),
            success: true,
            data: Some(data),
            message: message.into(),
        }
    }

    /// Create an error response
    pub fn error(status_code: u16, message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            status_code,
            success: false,
            data: None,
            message: message.into(),
        }
    }
}

/// Converts ServiceError to appropriate HTTP response with standard format
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, String) {
    let (status, message) = match error {
        ServiceError::Validation { message } => (StatusCode::BAD_REQUEST, message),
        ServiceError::NotFound { entity, identifier } => (
            StatusCode::NOT_FOUND,
            format!("{} '{}' not found", entity, identifier),
        ),
        ServiceError::AlreadyExists { entity, .. } => (
            StatusCode::CONFLICT,
            format!("{} already exists", entity),
        ),
        ServiceError::Unauthorized { message } => (StatusCode::UNAUTHORIZED, message),
        ServiceError::InvalidOperation { message } => (StatusCode::BAD_REQUEST, message),
        ServiceError::Database { source } => {
            tracing::error!("Database error: {}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
        ServiceError::ExternalService { message } => (StatusCode::BAD_GATEWAY, message),
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            (StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    };

    let error_response = ApiResponse::<()>::error(status.as_u16(), message);
    (status, serde_json::to_string(&error_response).unwrap())
}

/// Helper to create a 400 validation error response
pub fn validation_error_response(message: impl Into<String>) -> (StatusCode, String) {
    let error_response = ApiResponse::<()>::error(StatusCode::BAD_REQUEST.as_u16(), message);
    (
        StatusCode::BAD_REQUEST,
        serde_json::to_string(&error_response).unwrap(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_mirrors_status() {
        let response = ApiResponse::success(serde_json::json!({"id": 1}), "ok");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["id"], 1);
        assert_eq!(json["message"], "ok");
    }

    #[test]
    fn error_envelope_omits_data() {
        let response = ApiResponse::<()>::error(409, "User already exists");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["statusCode"], 409);
        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn service_errors_map_to_expected_statuses() {
        let cases = vec![
            (ServiceError::validation("bad"), StatusCode::BAD_REQUEST),
            (
                ServiceError::not_found("User", "alice"),
                StatusCode::NOT_FOUND,
            ),
            (
                ServiceError::already_exists("User", "alice"),
                StatusCode::CONFLICT,
            ),
            (
                ServiceError::unauthorized("nope"),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ServiceError::external_service("upstream down"),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ServiceError::internal_error("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let (status, body) = service_error_to_http(error);
            assert_eq!(status, expected);

            let envelope: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert_eq!(envelope["statusCode"], expected.as_u16());
            assert_eq!(envelope["success"], false);
        }
    }
}
