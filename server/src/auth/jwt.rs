//! JWT token service
//!
//! Generates, validates, and parses the server-issued session tokens.
//! Sessions are always signed, expiring JWTs carrying a role claim; the
//! server never trusts a client-constructed token.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Role;

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    /// Token issuer
    pub issuer: String,
    /// Token audience
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: load_jwt_secret(),
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "savora-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "savora-clients".to_string()),
        }
    }
}

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account ID (subject)
    pub sub: String,
    /// Account email
    pub email: String,
    /// Display name
    pub name: String,
    /// Role claim: customer | outlet | master_admin
    pub role: String,
    /// Expiry timestamp
    pub exp: i64,
    /// Issued-at timestamp
    pub iat: i64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// Generate a printable random secret (development fallback)
fn generate_dev_jwt_secret() -> String {
    let allowed =
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";
    let rng = SystemRandom::new();
    let mut key = String::with_capacity(64);
    for _ in 0..64 {
        let mut byte = [0u8; 1];
        if rng.fill(&mut byte).is_err() {
            return "SavoraDevelopmentFallbackSecret-ReplaceMe".to_string();
        }
        let idx = (byte[0] as usize) % allowed.len();
        key.push(allowed.as_bytes()[idx] as char);
    }
    key
}

/// Load the JWT secret from the environment
///
/// In release builds JWT_SECRET is mandatory; in debug builds a random
/// per-process secret is generated so every restart invalidates sessions.
fn load_jwt_secret() -> String {
    match std::env::var("JWT_SECRET") {
        Ok(secret) if secret.len() >= 32 => secret,
        Ok(_) => {
            #[cfg(not(debug_assertions))]
            panic!("JWT_SECRET must be at least 32 characters long");
            #[cfg(debug_assertions)]
            {
                tracing::warn!("JWT_SECRET too short, generating temporary development key");
                generate_dev_jwt_secret()
            }
        }
        Err(_) => {
            #[cfg(not(debug_assertions))]
            panic!("JWT_SECRET environment variable must be set in production");
            #[cfg(debug_assertions)]
            {
                tracing::warn!("JWT_SECRET not set, generating temporary development key");
                generate_dev_jwt_secret()
            }
        }
    }
}

/// JWT token service
#[derive(Debug, Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Generate a new token for an account
    pub fn generate_token(
        &self,
        account_id: &str,
        email: &str,
        name: &str,
        role: Role,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: account_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            role: role.as_str().to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an Authorization header
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

/// Current account context, parsed from validated JWT claims
///
/// Created by the auth middleware (or extractor) and injected into request
/// extensions for the handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl CurrentUser {
    /// Master admin sees everything
    pub fn is_master_admin(&self) -> bool {
        self.role == Role::MasterAdmin
    }
}

impl TryFrom<Claims> for CurrentUser {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let role = claims
            .role
            .parse::<Role>()
            .map_err(|_| JwtError::InvalidToken(format!("Unknown role claim: {}", claims.role)))?;

        Ok(Self {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "test-secret-key-that-is-long-enough-123".to_string(),
            expiration_minutes: 60,
            issuer: "savora-server".to_string(),
            audience: "savora-clients".to_string(),
        })
    }

    #[test]
    fn token_round_trip() {
        let svc = test_service();
        let token = svc
            .generate_token("user:abc", "a@b.com", "Asha", Role::Customer)
            .unwrap();
        let claims = svc.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "user:abc");
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.role, "customer");

        let user = CurrentUser::try_from(claims).unwrap();
        assert_eq!(user.role, Role::Customer);
        assert!(!user.is_master_admin());
    }

    #[test]
    fn expired_token_rejected() {
        let svc = JwtService::with_config(JwtConfig {
            secret: "test-secret-key-that-is-long-enough-123".to_string(),
            expiration_minutes: -10,
            issuer: "savora-server".to_string(),
            audience: "savora-clients".to_string(),
        });
        let token = svc
            .generate_token("user:abc", "a@b.com", "Asha", Role::Customer)
            .unwrap();
        assert!(matches!(
            svc.validate_token(&token),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn tampered_token_rejected() {
        let svc = test_service();
        let other = JwtService::with_config(JwtConfig {
            secret: "a-completely-different-secret-key-456789".to_string(),
            ..svc.config.clone()
        });
        let token = other
            .generate_token("outlet:xyz", "o@b.com", "Chai Point", Role::Outlet)
            .unwrap();
        assert!(svc.validate_token(&token).is_err());
    }

    #[test]
    fn header_extraction() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }
}
