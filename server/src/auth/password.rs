//! Password hashing
//!
//! Salted PBKDF2-HMAC-SHA512, stored as `salthex:hashhex`. Verification
//! re-derives with the stored salt; `ring::pbkdf2::verify` compares in
//! constant time.

use std::num::NonZeroU32;

use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use thiserror::Error;

static ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA512;
const SALT_LEN: usize = 16;
const CREDENTIAL_LEN: usize = 64;
const ITERATIONS: u32 = 100_000;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to generate random salt")]
    SaltGeneration,

    #[error("Stored password hash is malformed")]
    MalformedHash,
}

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let rng = SystemRandom::new();
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt).map_err(|_| PasswordError::SaltGeneration)?;

    let mut derived = [0u8; CREDENTIAL_LEN];
    pbkdf2::derive(
        ALGORITHM,
        NonZeroU32::new(ITERATIONS).expect("iterations is non-zero"),
        &salt,
        password.as_bytes(),
        &mut derived,
    );

    Ok(format!("{}:{}", hex::encode(salt), hex::encode(derived)))
}

/// Verify a password against a stored `salthex:hashhex` value
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let (salt_hex, hash_hex) = stored.split_once(':').ok_or(PasswordError::MalformedHash)?;
    let salt = hex::decode(salt_hex).map_err(|_| PasswordError::MalformedHash)?;
    let expected = hex::decode(hash_hex).map_err(|_| PasswordError::MalformedHash)?;

    Ok(pbkdf2::verify(
        ALGORITHM,
        NonZeroU32::new(ITERATIONS).expect("iterations is non-zero"),
        &salt,
        password.as_bytes(),
        &expected,
    )
    .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let stored = hash_password("hunter22").unwrap();
        assert!(verify_password("hunter22", &stored).unwrap());
        assert!(!verify_password("hunter23", &stored).unwrap());
    }

    #[test]
    fn stored_format_is_salt_colon_hash() {
        let stored = hash_password("secret").unwrap();
        let (salt, hash) = stored.split_once(':').unwrap();
        assert_eq!(salt.len(), SALT_LEN * 2);
        assert_eq!(hash.len(), CREDENTIAL_LEN * 2);
    }

    #[test]
    fn salts_are_unique() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_rejected() {
        assert!(verify_password("x", "no-colon-here").is_err());
        assert!(verify_password("x", "nothex:nothex").is_err());
    }
}
