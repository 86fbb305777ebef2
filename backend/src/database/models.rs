//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. Note that these may differ from API-specific models;
//! anything returned to a client goes through the sanitized [`UserProfile`]
//! projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-facing projection of a user. Never carries the password hash or
/// the stored refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            avatar_url: user.avatar_url,
            cover_image_url: user.cover_image_url,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Fully-validated user creation data, ready for insertion.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "User ID is required"))]
    pub id: String,

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

    #[validate(length(
        min = 1,
        max = 255,
        message = "Full name must be between 1-255 characters"
    ))]
    pub full_name: String,

    #[validate(length(min = 1, message = "Password hash is required"))]
    pub password_hash: String,

    #[validate(length(min = 1, message = "Avatar URL is required"))]
    pub avatar_url: String,

    pub cover_image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: "0192d3c1-0000-7000-8000-000000000000".to_string(),
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            full_name: "Alice Example".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            avatar_url: "http://media.local/avatar.png".to_string(),
            cover_image_url: None,
            refresh_token: Some("stored-token".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn profile_projection_strips_secrets() {
        let profile = UserProfile::from(sample_user());
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["username"], "alice");
        assert!(json.get("password_hash").is_none());
        assert!(json.get("refresh_token").is_none());
    }

    #[test]
    fn create_user_rejects_malformed_email() {
        let create = CreateUser {
            id: "id".to_string(),
            username: "alice".to_string(),
            email: "not-an-email".to_string(),
            full_name: "Alice Example".to_string(),
            password_hash: "hash".to_string(),
            avatar_url: "http://media.local/avatar.png".to_string(),
            cover_image_url: None,
        };

        assert!(create.validate().is_err());
    }
}
