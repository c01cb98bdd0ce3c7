//! Shared types for the Pattern Commerce backend
//!
//! DTOs exchanged between the HTTP API and its clients: the unified
//! response envelope and the account/auth request-response shapes.

pub mod client;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
pub use response::{API_CODE_SUCCESS, ApiResponse};
