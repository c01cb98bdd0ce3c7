//! Pattern Commerce Server - catalog and account backend
//!
//! # Architecture
//!
//! - **Catalog** (`catalog`): product lifecycle workflow — image store,
//!   product code generation, dedup enforcement
//! - **Database** (`db`): embedded SurrealDB storage and repositories
//! - **Auth** (`auth`): JWT + Argon2 authentication, role gate
//! - **HTTP API** (`api`): RESTful routes and handlers
//!
//! # Module structure
//!
//! ```text
//! pattern-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT verification, role middleware
//! ├── catalog/       # image store, product codes, catalog service
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models and repositories
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod catalog;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - structured events for auth failures and denials
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
