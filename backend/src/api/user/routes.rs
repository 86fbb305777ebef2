//! Defines the HTTP routes for user profile management.
//!
//! Every route here requires an authenticated caller; the JWT middleware is
//! applied to the whole router.

use crate::api::user::handlers::*;
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

/// Creates the user router with all profile-related routes
pub fn user_router() -> Router {
    Router::new()
        .route("/me", get(me))
        .route("/change-password", post(change_password))
        .route("/account", patch(update_account))
        .route("/avatar", patch(update_avatar))
        .route("/cover-image", patch(update_cover_image))
        .layer(middleware::from_fn(jwt_auth))
}
