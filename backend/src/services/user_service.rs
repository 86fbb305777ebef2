//! User business logic service.
//!
//! Handles account creation, credential verification, and profile mutations.

use crate::api::user::models::{ChangePasswordRequest, UpdateAccountRequest};
use crate::auth::models::RegisterRequest;
use crate::database::models::{CreateUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use crate::services::media_service::MediaStore;
use bcrypt::{DEFAULT_COST, hash, verify};
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Registers a new user account.
    ///
    /// Uploads the avatar (required) and cover image (optional) through the
    /// media store, hashes the password, and inserts the record.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures (missing fields, malformed email, missing avatar)
    /// - Duplicate username or email
    /// - Media upload failures
    pub async fn register(
        &self,
        media: &dyn MediaStore,
        request: RegisterRequest,
    ) -> ServiceResult<User> {
        if let Err(validation_errors) = request.validate() {
            let error_messages: Vec<String> = validation_errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        format!(
                            "{}: {}",
                            field,
                            error.message.as_ref().unwrap_or(&"Invalid value".into())
                        )
                    })
                })
                .collect();
            return Err(ServiceError::validation(error_messages.join(", ")));
        }

        let repo = UserRepository::new(self.pool);

        if repo
            .username_or_email_exists(&request.username, &request.email)
            .await?
        {
            return Err(ServiceError::already_exists("User", &request.username));
        }

        let avatar_url = media.upload(&request.avatar).await.map_err(|e| {
            tracing::error!("Avatar upload failed: {}", e);
            ServiceError::validation("Avatar file is required")
        })?;

        let cover_image_url = match &request.cover_image {
            Some(cover) => Some(media.upload(cover).await?),
            None => None,
        };

        let password_hash = Self::hash_password(&request.password)?;

        let user = repo
            .create_user(CreateUser {
                id: Uuid::now_v7().to_string(),
                username: request.username.to_lowercase(),
                email: request.email,
                full_name: request.full_name,
                password_hash,
                avatar_url,
                cover_image_url,
            })
            .await?;

        Ok(user)
    }

    /// Verifies a submitted identifier + password pair.
    ///
    /// At least one of `username` / `email` must be provided. The password is
    /// compared against the stored hash with bcrypt's own comparison.
    ///
    /// # Errors
    /// - `NotFound` when no user matches the identifier
    /// - `Unauthorized` when the password does not match
    pub async fn verify_credentials(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        password: &str,
    ) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);

        let identifier = username.or(email).unwrap_or_default().to_string();
        let user = repo
            .get_user_by_username_or_email(username, email)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", &identifier))?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(ServiceError::unauthorized("Invalid user credentials"));
        }

        Ok(user)
    }

    /// Changes the caller's password.
    ///
    /// The old password must verify against the stored hash and the new value
    /// must be confirmed by a repeated entry. The stored refresh credential
    /// is revoked in the same update.
    pub async fn change_password(
        &self,
        user_id: &str,
        request: ChangePasswordRequest,
    ) -> ServiceResult<()> {
        if let Err(validation_errors) = request.validate() {
            let error_messages: Vec<String> = validation_errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        format!(
                            "{}: {}",
                            field,
                            error.message.as_ref().unwrap_or(&"Invalid value".into())
                        )
                    })
                })
                .collect();
            return Err(ServiceError::validation(error_messages.join(", ")));
        }

        if request.new_password != request.confirm_password {
            return Err(ServiceError::validation(
                "New password and confirmation do not match",
            ));
        }

        let user = self.get_user_required(user_id).await?;

        if !Self::verify_password(&request.old_password, &user.password_hash)? {
            return Err(ServiceError::unauthorized("Invalid old password"));
        }

        let password_hash = Self::hash_password(&request.new_password)?;

        let repo = UserRepository::new(self.pool);
        repo.update_password(user_id, &password_hash).await?;

        Ok(())
    }

    /// Updates display name and/or email.
    pub async fn update_account_details(
        &self,
        user_id: &str,
        request: UpdateAccountRequest,
    ) -> ServiceResult<User> {
        if request.full_name.is_none() && request.email.is_none() {
            return Err(ServiceError::validation(
                "At least one of full_name or email is required",
            ));
        }

        if let Err(validation_errors) = request.validate() {
            let error_messages: Vec<String> = validation_errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        format!(
                            "{}: {}",
                            field,
                            error.message.as_ref().unwrap_or(&"Invalid value".into())
                        )
                    })
                })
                .collect();
            return Err(ServiceError::validation(error_messages.join(", ")));
        }

        let repo = UserRepository::new(self.pool);

        if let Some(email) = &request.email {
            if repo.email_exists_excluding(email, user_id).await? {
                return Err(ServiceError::already_exists("User", email));
            }
        }

        let user = repo
            .update_account_details(
                user_id,
                request.full_name.as_deref(),
                request.email.as_deref(),
            )
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;

        Ok(user)
    }

    /// Replaces the caller's avatar with a freshly uploaded file.
    pub async fn update_avatar(
        &self,
        media: &dyn MediaStore,
        user_id: &str,
        file: crate::services::media_service::FileUpload,
    ) -> ServiceResult<User> {
        let avatar_url = media.upload(&file).await?;

        let repo = UserRepository::new(self.pool);
        let user = repo
            .update_avatar(user_id, &avatar_url)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;

        Ok(user)
    }

    /// Replaces the caller's cover image with a freshly uploaded file.
    pub async fn update_cover_image(
        &self,
        media: &dyn MediaStore,
        user_id: &str,
        file: crate::services::media_service::FileUpload,
    ) -> ServiceResult<User> {
        let cover_image_url = media.upload(&file).await?;

        let repo = UserRepository::new(self.pool);
        let user = repo
            .update_cover_image(user_id, &cover_image_url)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;

        Ok(user)
    }

    /// Retrieves a user by ID with existence verification.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if user doesn't exist
    pub async fn get_user_required(&self, id: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;
        Ok(user)
    }

    /// Function to hash a password before storing in database
    fn hash_password(password: &str) -> ServiceResult<String> {
        hash(password, DEFAULT_COST)
            .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
    }

    /// Function to verify a password against the stored hash
    fn verify_password(password: &str, hash: &str) -> ServiceResult<bool> {
        verify(password, hash).map_err(|e| {
            ServiceError::internal_error(format!("Password verification failed: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_is_not_plaintext_and_verifies() {
        let hashed = UserService::hash_password("hunter2-but-longer").unwrap();

        assert_ne!(hashed, "hunter2-but-longer");
        assert!(UserService::verify_password("hunter2-but-longer", &hashed).unwrap());
        assert!(!UserService::verify_password("wrong-password", &hashed).unwrap());
    }
}
