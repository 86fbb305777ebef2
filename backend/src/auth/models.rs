//! Data structures for authentication-related entities.
//!
//! This module defines the request and response models for registration,
//! login, and token rotation.

use crate::database::models::UserProfile;
use crate::services::media_service::FileUpload;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration input, assembled from the multipart form by the handler.
#[derive(Debug, Validate)]
pub struct RegisterRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Full name must be between 1-255 characters"
    ))]
    pub full_name: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Username must be between 1-255 characters"
    ))]
    pub username: String,

    #[validate(
        email(message = "Must be a valid email"),
        length(max = 255, message = "Email too long")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    pub avatar: FileUpload,

    pub cover_image: Option<FileUpload>,
}

/// Login request payload. At least one of `username` / `email` is required.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    pub username: Option<String>,

    pub email: Option<String>,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response containing tokens and the sanitized user record.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
}

/// Token refresh request body, used as a fallback when the refresh cookie
/// is absent.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: Option<String>,
}

/// Token refresh response. Rotation always returns a fresh pair.
#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// A freshly minted access/refresh pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
