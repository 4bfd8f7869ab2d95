//! Server configuration
//!
//! Everything comes from environment variables with sensible defaults, so a
//! bare `cargo run` starts a working development server.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | HTTP_PORT | 3000 | HTTP API port |
//! | DATA_DIR | ./data | RocksDB data directory |
//! | ENVIRONMENT | development | development / staging / production |
//! | JWT_SECRET | generated (dev only) | HMAC key for session tokens |
//! | JWT_EXPIRATION_MINUTES | 1440 | Session token lifetime |
//! | OTP_EXPIRY_MINUTES | 10 | Password-reset code lifetime |
//! | MASTER_ADMIN_EMAIL | unset | Outlet account with platform-wide access |
//! | SMTP_HOST / SMTP_PORT / SMTP_USERNAME / SMTP_PASSWORD / SMTP_FROM | unset | Reset-code mail relay |
//! | PAYMENT_KEY_ID / PAYMENT_KEY_SECRET | unset | Online payment gateway keys |
//! | PAYMENT_BASE_URL | https://api.razorpay.com | Gateway API base |
//! | PAYMENT_CURRENCY | INR | Gateway order currency |

use crate::auth::JwtConfig;

/// SMTP relay settings; absent means the server runs without outbound mail
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

impl SmtpConfig {
    fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            host,
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            from: std::env::var("SMTP_FROM").unwrap_or_else(|_| "no-reply@savora.app".into()),
        })
    }
}

/// Payment gateway keys; absent disables online payment endpoints
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub key_id: String,
    pub key_secret: String,
    pub base_url: String,
    pub currency: String,
}

impl GatewayConfig {
    fn from_env() -> Option<Self> {
        let key_id = std::env::var("PAYMENT_KEY_ID").ok()?;
        let key_secret = std::env::var("PAYMENT_KEY_SECRET").ok()?;
        Some(Self {
            key_id,
            key_secret,
            base_url: std::env::var("PAYMENT_BASE_URL")
                .unwrap_or_else(|_| "https://api.razorpay.com".into()),
            currency: std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "INR".into()),
        })
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Directory for the embedded database
    pub data_dir: String,
    /// development | staging | production
    pub environment: String,
    /// Session token settings
    pub jwt: JwtConfig,
    /// Password-reset code lifetime
    pub otp_expiry_minutes: i64,
    /// Outlet email granted platform-wide access
    pub master_admin_email: Option<String>,
    pub smtp: Option<SmtpConfig>,
    pub gateway: Option<GatewayConfig>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt: JwtConfig::default(),
            otp_expiry_minutes: std::env::var("OTP_EXPIRY_MINUTES")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10),
            master_admin_email: std::env::var("MASTER_ADMIN_EMAIL")
                .ok()
                .map(|e| e.trim().to_lowercase())
                .filter(|e| !e.is_empty()),
            smtp: SmtpConfig::from_env(),
            gateway: GatewayConfig::from_env(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
