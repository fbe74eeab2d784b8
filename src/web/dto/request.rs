//! Request DTOs for the Quill web API.
//!
//! The registration body is [`crate::auth::RegisterInput`], which carries
//! its own validation rules.

use serde::Deserialize;

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}
