//! Business logic layer.

pub mod media_service;
pub mod user_service;
