//! Savora Server - multi-tenant QR storefront backend
//!
//! Outlets publish their menus, customers scan a QR code to browse and
//! order, staff work the order queue. One embedded database, one binary.
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── core/          # config, state, HTTP lifecycle
//! ├── auth/          # JWT sessions, roles, password hashing
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models and repositories (SurrealDB)
//! ├── orders/        # order lifecycle rules
//! ├── otp/           # password-reset codes
//! ├── payment/       # online gateway client
//! ├── mail.rs        # SMTP relay
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod mail;
pub mod orders;
pub mod otp;
pub mod payment;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService, Role};
pub use core::{Config, Server, ServerState, build_app, build_router};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - tracing with a fixed "security" target
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
