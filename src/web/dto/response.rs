//! Response DTOs for the Quill web API.

use serde::Serialize;

use crate::auth::Session;
use crate::db::TIMESTAMP_FORMAT;

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// User information in responses.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// Session information returned by authentication endpoints.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// The signed-in user.
    pub user: UserInfo,
    /// Session expiry timestamp.
    pub expires_at: String,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            user: UserInfo {
                id: session.user_id,
                name: session.name.clone(),
                email: session.email.clone(),
            },
            expires_at: session.expires_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_session_response_from_session() {
        let session = Session {
            token: "tok".to_string(),
            user_id: 7,
            name: "John".to_string(),
            email: "john@example.com".to_string(),
            expires_at: Utc.with_ymd_and_hms(2099, 12, 31, 23, 59, 59).unwrap(),
        };

        let response = SessionResponse::from(&session);
        assert_eq!(response.user.id, 7);
        assert_eq!(response.user.name, "John");
        assert_eq!(response.expires_at, "2099-12-31 23:59:59");
    }

    #[test]
    fn test_api_response_serializes_under_data() {
        let body = serde_json::to_value(ApiResponse::new(42)).unwrap();
        assert_eq!(body["data"], 42);
    }

    #[test]
    fn test_session_response_never_leaks_token() {
        let session = Session {
            token: "secret-token".to_string(),
            user_id: 1,
            name: "John".to_string(),
            email: "john@example.com".to_string(),
            expires_at: Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap(),
        };

        let body = serde_json::to_string(&SessionResponse::from(&session)).unwrap();
        assert!(!body.contains("secret-token"));
    }
}
