//! Utility module - common helpers and types
//!
//! - [`AppError`] - application error type with HTTP mapping
//! - [`AppResult`] - handler result alias
//! - logging setup

pub mod error;
pub mod logger;

pub use error::{AppError, AppResult, ok, ok_with_message};
