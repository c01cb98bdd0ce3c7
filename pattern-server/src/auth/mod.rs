//! Authentication and authorization
//!
//! JWT token verification plus the role gate applied to protected routes.

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_role};
