//! User Model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shared::client::UserInfo;
use surrealdb::sql::Thing;

use super::thing_to_string;

pub type UserId = Thing;

/// Closed role set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Admin,
    Vendor,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserRole::Customer => "customer",
            UserRole::Admin => "admin",
            UserRole::Vendor => "vendor",
        };
        f.write_str(s)
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(UserRole::Customer),
            "admin" => Ok(UserRole::Admin),
            "vendor" => Ok(UserRole::Vendor),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// User model. The `password` field holds the Argon2 hash and never
/// leaves the server — API responses use [`UserInfo`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub address: Option<String>,
    /// Soft-delete flag (declared, not exercised)
    #[serde(default)]
    pub is_deleted: bool,
    /// Creation timestamp (unix millis)
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone_number: Option<String>,
    pub role: UserRole,
}

impl User {
    /// Verify a password against the stored Argon2 hash
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    /// Sanitized view for API responses (no password hash)
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.as_ref().map(thing_to_string).unwrap_or_default(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            role: self.role.to_string(),
            address: self.address.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trip() {
        let hash = User::hash_password("s3cret-pass").unwrap();
        let user = User {
            id: None,
            name: "Jo".to_string(),
            email: "jo@example.com".to_string(),
            password: hash,
            phone_number: None,
            role: UserRole::Customer,
            address: None,
            is_deleted: false,
            created_at: 0,
        };

        assert!(user.verify_password("s3cret-pass").unwrap());
        assert!(!user.verify_password("wrong").unwrap());
    }

    #[test]
    fn user_info_excludes_password() {
        let user = User {
            id: Some(Thing::from(("user", "abc"))),
            name: "Jo".to_string(),
            email: "jo@example.com".to_string(),
            password: "$argon2id$...".to_string(),
            phone_number: Some("555".to_string()),
            role: UserRole::Admin,
            address: None,
            is_deleted: false,
            created_at: 0,
        };

        let info = user.to_info();
        assert_eq!(info.id, "user:abc");
        assert_eq!(info.role, "admin");
        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn role_parse_round_trip() {
        for role in [UserRole::Customer, UserRole::Admin, UserRole::Vendor] {
            assert_eq!(role.to_string().parse::<UserRole>().unwrap(), role);
        }
        assert!("root".parse::<UserRole>().is_err());
    }
}
