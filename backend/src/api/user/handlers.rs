//! Handler functions for user profile API endpoints.
//!
//! These functions process requests for the authenticated user's own record:
//! fetching it, changing the password, updating account details, and
//! replacing avatar or cover image. Identity always comes from the claims
//! attached by the auth middleware, never from the request body.

use crate::api::common::{ApiResponse, service_error_to_http, validation_error_response};
use crate::api::user::models::{ChangePasswordRequest, UpdateAccountRequest};
use crate::database::models::UserProfile;
use crate::services::media_service::{FileUpload, MediaStore};
use crate::services::user_service::UserService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Multipart},
    http::StatusCode,
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Returns the authenticated user's own record.
#[axum::debug_handler]
pub async fn me(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
) -> Result<Json<ApiResponse<UserProfile>>, (StatusCode, String)> {
    let user_service = UserService::new(&pool);
    let user = user_service
        .get_user_required(&claims.sub)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        user.into(),
        "Current user fetched successfully",
    )))
}

/// Changes the authenticated user's password.
#[axum::debug_handler]
pub async fn change_password(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, (StatusCode, String)> {
    let user_service = UserService::new(&pool);
    user_service
        .change_password(&claims.sub, payload)
        .await
        .map_err(service_error_to_http)?;

    tracing::info!("Password changed for user {}", claims.sub);

    Ok(Json(ApiResponse::success(
        serde_json::json!({}),
        "Password changed successfully",
    )))
}

/// Updates the authenticated user's display name and/or email.
#[axum::debug_handler]
pub async fn update_account(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Json(payload): Json<UpdateAccountRequest>,
) -> Result<Json<ApiResponse<UserProfile>>, (StatusCode, String)> {
    let user_service = UserService::new(&pool);
    let user = user_service
        .update_account_details(&claims.sub, payload)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        user.into(),
        "Account details updated successfully",
    )))
}

/// Replaces the authenticated user's avatar.
#[axum::debug_handler]
pub async fn update_avatar(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Extension(media): Extension<Arc<dyn MediaStore>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<UserProfile>>, (StatusCode, String)> {
    let file = read_single_file(multipart, "avatar").await?;

    let user_service = UserService::new(&pool);
    let user = user_service
        .update_avatar(media.as_ref(), &claims.sub, file)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        user.into(),
        "Avatar updated successfully",
    )))
}

/// Replaces the authenticated user's cover image.
#[axum::debug_handler]
pub async fn update_cover_image(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Extension(media): Extension<Arc<dyn MediaStore>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<UserProfile>>, (StatusCode, String)> {
    let file = read_single_file(multipart, "coverImage").await?;

    let user_service = UserService::new(&pool);
    let user = user_service
        .update_cover_image(media.as_ref(), &claims.sub, file)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        user.into(),
        "Cover image updated successfully",
    )))
}

/// Reads the expected single file field out of a multipart request.
async fn read_single_file(
    mut multipart: Multipart,
    field_name: &str,
) -> Result<FileUpload, (StatusCode, String)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| validation_error_response(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let filename = field.file_name().unwrap_or(field_name).to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| validation_error_response(format!("Invalid multipart payload: {}", e)))?
            .to_vec();

        return Ok(FileUpload {
            filename,
            content_type,
            data,
        });
    }

    Err(validation_error_response(format!(
        "{} file is missing",
        field_name
    )))
}
