//! API layer: response envelope plus the user-facing route modules.

pub mod common;
pub mod user;
