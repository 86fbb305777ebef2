//! Request models for user profile endpoints.

use serde::Deserialize;
use validator::Validate;

/// Password change request. The new value must be confirmed by a repeated
/// entry before it replaces the stored hash.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,

    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,

    #[validate(length(min = 1, message = "Password confirmation is required"))]
    pub confirm_password: String,
}

/// Partial account-detail update. At least one field must be present.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Full name must be between 1-255 characters"
    ))]
    pub full_name: Option<String>,

    #[validate(
        email(message = "Must be a valid email"),
        length(max = 255, message = "Email too long")
    )]
    pub email: Option<String>,
}
