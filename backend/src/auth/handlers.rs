//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for registration, login,
//! token refresh, and logout, parse request data, validate input, and
//! interact with the `auth::service` for core business logic.

use crate::api::common::{ApiResponse, service_error_to_http, validation_error_response};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::config::Config;
use crate::services::media_service::{FileUpload, MediaStore};
use crate::services::user_service::UserService;
use crate::utils::cookies::{
    ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, build_clear_cookie, build_set_cookie, get_cookie,
};
use crate::utils::jwt::Claims;
use axum::{
    body::Bytes,
    extract::{Extension, Json, Multipart},
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Response},
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Handle user registration request.
///
/// Expects a multipart form with `fullname`, `username`, `email`, `password`
/// text fields, a required `avatar` file, and an optional `coverImage` file.
#[axum::debug_handler]
pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    Extension(media): Extension<Arc<dyn MediaStore>>,
    mut multipart: Multipart,
) -> Result<Response, (StatusCode, String)> {
    let mut full_name: Option<String> = None;
    let mut username: Option<String> = None;
    let mut email: Option<String> = None;
    let mut password: Option<String> = None;
    let mut avatar: Option<FileUpload> = None;
    let mut cover_image: Option<FileUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| validation_error_response(format!("Invalid multipart payload: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "fullname" => {
                full_name = Some(field.text().await.map_err(|e| {
                    validation_error_response(format!("Invalid multipart payload: {}", e))
                })?);
            }
            "username" => {
                username = Some(field.text().await.map_err(|e| {
                    validation_error_response(format!("Invalid multipart payload: {}", e))
                })?);
            }
            "email" => {
                email = Some(field.text().await.map_err(|e| {
                    validation_error_response(format!("Invalid multipart payload: {}", e))
                })?);
            }
            "password" => {
                password = Some(field.text().await.map_err(|e| {
                    validation_error_response(format!("Invalid multipart payload: {}", e))
                })?);
            }
            "avatar" => {
                avatar = Some(read_file_field(field, "avatar").await?);
            }
            "coverImage" => {
                cover_image = Some(read_file_field(field, "coverImage").await?);
            }
            // Unknown fields are ignored, matching lenient form handling
            _ => {}
        }
    }

    let (full_name, username, email, password) =
        match (trimmed(full_name), trimmed(username), trimmed(email), trimmed(password)) {
            (Some(f), Some(u), Some(e), Some(p)) => (f, u, e, p),
            _ => return Err(validation_error_response("All fields are required")),
        };

    let avatar = avatar.ok_or_else(|| validation_error_response("Avatar file is required"))?;

    let request = RegisterRequest {
        full_name,
        username,
        email,
        password,
        avatar,
        cover_image,
    };

    let user_service = UserService::new(&pool);
    let user = user_service
        .register(media.as_ref(), request)
        .await
        .map_err(service_error_to_http)?;

    tracing::info!("Registered new user {}", user.username);

    let profile: crate::database::models::UserProfile = user.into();
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(profile, "User registered successfully")),
    )
        .into_response())
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, (StatusCode, String)> {
    let auth_service = AuthService::new(&pool, &config);

    let response = auth_service
        .login(payload)
        .await
        .map_err(service_error_to_http)?;

    let cookies = AppendHeaders([
        (
            SET_COOKIE,
            build_set_cookie(
                ACCESS_TOKEN_COOKIE,
                &response.access_token,
                auth_service.access_expiry_seconds(),
            ),
        ),
        (
            SET_COOKIE,
            build_set_cookie(
                REFRESH_TOKEN_COOKIE,
                &response.refresh_token,
                auth_service.refresh_expiry_seconds(),
            ),
        ),
    ]);

    Ok((
        StatusCode::OK,
        cookies,
        Json(ApiResponse::success(response, "User logged in successfully")),
    )
        .into_response())
}

/// Handle token refresh request.
///
/// The refresh value is read from the `refreshToken` cookie, with the JSON
/// body as a fallback for non-browser clients.
#[axum::debug_handler]
pub async fn refresh_token(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, (StatusCode, String)> {
    let from_cookie = get_cookie(&headers, REFRESH_TOKEN_COOKIE);
    let from_body = serde_json::from_slice::<RefreshTokenRequest>(&body)
        .ok()
        .and_then(|request| request.refresh_token);

    let presented = from_cookie.or(from_body).ok_or_else(|| {
        let error_response =
            ApiResponse::<()>::error(StatusCode::UNAUTHORIZED.as_u16(), "Unauthorized request");
        (
            StatusCode::UNAUTHORIZED,
            serde_json::to_string(&error_response).unwrap(),
        )
    })?;

    let auth_service = AuthService::new(&pool, &config);

    let rotated = auth_service
        .rotate_tokens(&presented)
        .await
        .map_err(service_error_to_http)?;

    let cookies = AppendHeaders([
        (
            SET_COOKIE,
            build_set_cookie(
                ACCESS_TOKEN_COOKIE,
                &rotated.access_token,
                auth_service.access_expiry_seconds(),
            ),
        ),
        (
            SET_COOKIE,
            build_set_cookie(
                REFRESH_TOKEN_COOKIE,
                &rotated.refresh_token,
                auth_service.refresh_expiry_seconds(),
            ),
        ),
    ]);

    Ok((
        StatusCode::OK,
        cookies,
        Json(ApiResponse::success(rotated, "Access token refreshed")),
    )
        .into_response())
}

/// Handle logout request.
///
/// Identity comes from the auth middleware; the stored refresh credential is
/// cleared and both cookies expire immediately.
#[axum::debug_handler]
pub async fn logout(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Extension(claims): Extension<Claims>,
) -> Result<Response, (StatusCode, String)> {
    let auth_service = AuthService::new(&pool, &config);

    auth_service
        .logout(&claims.sub)
        .await
        .map_err(service_error_to_http)?;

    let cookies = AppendHeaders([
        (SET_COOKIE, build_clear_cookie(ACCESS_TOKEN_COOKIE)),
        (SET_COOKIE, build_clear_cookie(REFRESH_TOKEN_COOKIE)),
    ]);

    Ok((
        StatusCode::OK,
        cookies,
        Json(ApiResponse::success(
            serde_json::json!({}),
            "User logged out successfully",
        )),
    )
        .into_response())
}

/// Reads a multipart file field into a [`FileUpload`].
async fn read_file_field(
    field: axum::extract::multipart::Field<'_>,
    fallback_name: &str,
) -> Result<FileUpload, (StatusCode, String)> {
    let filename = field
        .file_name()
        .unwrap_or(fallback_name)
        .to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let data = field
        .bytes()
        .await
        .map_err(|e| validation_error_response(format!("Invalid multipart payload: {}", e)))?
        .to_vec();

    Ok(FileUpload {
        filename,
        content_type,
        data,
    })
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
