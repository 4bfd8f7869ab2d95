//! Authentication and authorization
//!
//! - [`JwtService`] - session token service
//! - [`CurrentUser`] - authenticated account context
//! - [`require_auth`] - auth middleware
//! - [`password`] - salted PBKDF2 password hashing

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
pub use permissions::Role;
