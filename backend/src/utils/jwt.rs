//! JWT token utilities for authentication.
//!
//! Provides secure token creation, validation, and claims management for the
//! access/refresh credential pair. Access and refresh tokens are signed with
//! distinct secrets and carry different expiries.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::database::models::User;
use crate::errors::ServiceError;

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub username: String,
    pub email: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// Claims carried by a refresh token. Refresh tokens only identify the user;
/// everything else is re-read from the database on rotation.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RefreshClaims {
    /// User ID
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

/// JWT token utility for creating and validating both token kinds.
pub struct JwtUtils {
    access_encoding_key: EncodingKey,
    access_decoding_key: DecodingKey,
    access_expiry_seconds: i64,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    refresh_expiry_seconds: i64,
    validation: Validation,
}

impl JwtUtils {
    /// Create a new JwtUtils instance from application configuration.
    pub fn new(config: &Config) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtUtils {
            access_encoding_key: EncodingKey::from_secret(config.access_token_secret.as_bytes()),
            access_decoding_key: DecodingKey::from_secret(config.access_token_secret.as_bytes()),
            access_expiry_seconds: config.access_token_expiry_seconds,
            refresh_encoding_key: EncodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            refresh_decoding_key: DecodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            refresh_expiry_seconds: config.refresh_token_expiry_seconds,
            validation,
        }
    }

    /// Generate a short-lived access token for a user.
    pub fn generate_access_token(&self, user: &User) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.access_expiry_seconds);

        let claims = Claims {
            sub: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.access_encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }

    /// Generate a long-lived refresh token for a user.
    pub fn generate_refresh_token(&self, user_id: &str) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.refresh_expiry_seconds);

        let claims = RefreshClaims {
            sub: user_id.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.refresh_encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }

    /// Validate and decode an access token.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(token, &self.access_decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| ServiceError::unauthorized(format!("Invalid access token: {}", e)))
    }

    /// Validate and decode a refresh token.
    pub fn validate_refresh_token(&self, token: &str) -> Result<RefreshClaims, ServiceError> {
        decode::<RefreshClaims>(token, &self.refresh_decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| ServiceError::unauthorized(format!("Invalid refresh token: {}", e)))
    }

    /// Access token lifetime in seconds, for response bodies and cookies.
    pub fn access_expiry_seconds(&self) -> i64 {
        self.access_expiry_seconds
    }

    /// Refresh token lifetime in seconds, for cookies.
    pub fn refresh_expiry_seconds(&self) -> i64 {
        self.refresh_expiry_seconds
    }
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    /// Check if token has expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as usize;
        now > self.exp
    }
}
