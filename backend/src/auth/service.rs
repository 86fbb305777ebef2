//! Core business logic for the authentication system.
//!
//! Owns token issuance and rotation. Issuance persists the refresh value on
//! the user row; rotation replaces it with an atomic compare-and-swap so a
//! stale or previously rotated token can never be replayed.

use crate::auth::models::*;
use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use crate::services::user_service::UserService;
use crate::utils::jwt::JwtUtils;
use sqlx::SqlitePool;
use validator::Validate;

/// Authentication service handling login, token issuance, and rotation.
pub struct AuthService<'a> {
    pool: &'a SqlitePool,
    jwt_utils: JwtUtils,
    user_service: UserService<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(pool: &'a SqlitePool, config: &Config) -> Self {
        AuthService {
            pool,
            jwt_utils: JwtUtils::new(config),
            user_service: UserService::new(pool),
        }
    }

    /// Authenticate a user and issue a fresh token pair.
    pub async fn login(&self, login_request: LoginRequest) -> ServiceResult<LoginResponse> {
        if let Err(validation_errors) = login_request.validate() {
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

        let username = login_request
            .username
            .as_deref()
            .filter(|s| !s.trim().is_empty());
        let email = login_request
            .email
            .as_deref()
            .filter(|s| !s.trim().is_empty());

        if username.is_none() && email.is_none() {
            return Err(ServiceError::validation("Username or email is required"));
        }

        let user = self
            .user_service
            .verify_credentials(username, email, &login_request.password)
            .await?;

        let tokens = self.issue_tokens(&user.id).await?;

        Ok(LoginResponse {
            user: user.into(),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }

    /// Mint an access/refresh pair for a user and persist the refresh value.
    ///
    /// Any failure here (missing user, signing error, failed save) surfaces
    /// as a single opaque internal error; callers have already authenticated
    /// the user by other means.
    pub async fn issue_tokens(&self, user_id: &str) -> ServiceResult<TokenPair> {
        let repo = UserRepository::new(self.pool);

        let user = repo
            .get_user_by_id(user_id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load user for token issuance: {}", e);
                ServiceError::internal_error("Something went wrong while generating tokens")
            })?
            .ok_or_else(|| {
                ServiceError::internal_error("Something went wrong while generating tokens")
            })?;

        let access_token = self.jwt_utils.generate_access_token(&user)?;
        let refresh_token = self.jwt_utils.generate_refresh_token(&user.id)?;

        repo.set_refresh_token(&user.id, Some(&refresh_token))
            .await
            .map_err(|e| {
                tracing::error!("Failed to persist refresh token: {}", e);
                ServiceError::internal_error("Something went wrong while generating tokens")
            })?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Rotate a presented refresh token.
    ///
    /// Verifies signature and expiry before touching the database, then
    /// swaps the stored value for a fresh one in a single conditional
    /// update. A presented token that no longer matches the stored value is
    /// rejected as reuse.
    pub async fn rotate_tokens(&self, presented: &str) -> ServiceResult<RefreshTokenResponse> {
        let claims = self.jwt_utils.validate_refresh_token(presented)?;

        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_id(&claims.sub)
            .await?
            .ok_or_else(|| ServiceError::unauthorized("Invalid refresh token"))?;

        let access_token = self.jwt_utils.generate_access_token(&user)?;
        let refresh_token = self.jwt_utils.generate_refresh_token(&user.id)?;

        let swapped = repo
            .swap_refresh_token(&user.id, presented, &refresh_token)
            .await?;

        if !swapped {
            tracing::warn!("Refresh token reuse detected for user {}", user.id);
            return Err(ServiceError::unauthorized(
                "Refresh token is expired or has been used",
            ));
        }

        Ok(RefreshTokenResponse {
            access_token,
            refresh_token,
        })
    }

    /// Clear the stored refresh credential for a user.
    pub async fn logout(&self, user_id: &str) -> ServiceResult<()> {
        let repo = UserRepository::new(self.pool);
        repo.set_refresh_token(user_id, None).await?;

        Ok(())
    }

    /// Access token lifetime, exposed for cookie Max-Age.
    pub fn access_expiry_seconds(&self) -> i64 {
        self.jwt_utils.access_expiry_seconds()
    }

    /// Refresh token lifetime, exposed for cookie Max-Age.
    pub fn refresh_expiry_seconds(&self) -> i64 {
        self.jwt_utils.refresh_expiry_seconds()
    }
}
