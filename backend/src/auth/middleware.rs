//! Middleware for protecting authenticated routes.
//!
//! Validates the access token from the `accessToken` cookie or the
//! `Authorization: Bearer` header and attaches the decoded claims to the
//! request for downstream handlers.

use crate::api::common::ApiResponse;
use crate::config::Config;
use crate::utils::cookies::{ACCESS_TOKEN_COOKIE, get_cookie};
use crate::utils::jwt::JwtUtils;
use axum::{
    extract::Request,
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// JWT authentication middleware
pub async fn jwt_auth(mut request: Request, next: Next) -> Result<Response, (StatusCode, String)> {
    let config = request
        .extensions()
        .get::<Config>()
        .cloned()
        .ok_or_else(|| {
            error_response(
                "Authentication is not configured",
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        })?;

    // Cookie first, Authorization header as fallback
    let token = get_cookie(request.headers(), ACCESS_TOKEN_COOKIE).or_else(|| {
        request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .map(|token| token.to_string())
    });

    let token =
        token.ok_or_else(|| error_response("Unauthorized request", StatusCode::UNAUTHORIZED))?;

    let jwt_utils = JwtUtils::new(&config);

    match jwt_utils.validate_access_token(&token) {
        Ok(claims) => {
            // Add claims to request extensions for use in handlers
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(_) => Err(error_response(
            "Invalid access token",
            StatusCode::UNAUTHORIZED,
        )),
    }
}

fn error_response(message: &str, status: StatusCode) -> (StatusCode, String) {
    let error_response = ApiResponse::<()>::error(status.as_u16(), message);
    (status, serde_json::to_string(&error_response).unwrap())
}
