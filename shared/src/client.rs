//! Client-facing account DTOs
//!
//! Request/response shapes for registration, login and user queries.
//! The password hash never appears in any of these types.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Sanitized user info returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub role: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// Login response: session token plus sanitized user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Body for the user-by-id lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserByIdRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_rejects_bad_email() {
        let req = RegisterRequest {
            name: "Asha".to_string(),
            email: "not-an-email".to_string(),
            password: "secret123".to_string(),
            phone_number: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn register_request_accepts_valid_input() {
        let req = RegisterRequest {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "secret123".to_string(),
            phone_number: Some("555-0101".to_string()),
        };
        assert!(req.validate().is_ok());
    }
}
