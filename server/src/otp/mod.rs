//! One-time passcode service for password resets
//!
//! Codes are six decimal digits drawn from the system CSPRNG, stored one per
//! email, and good for a single use within the configured expiry window.

use chrono::{Duration, Utc};
use ring::rand::{SecureRandom, SystemRandom};
use thiserror::Error;

use crate::db::models::OtpRecord;
use crate::db::repository::{OtpRepository, RepoError};
use crate::utils::AppError;

const CODE_LEN: u32 = 6;

#[derive(Debug, Error)]
pub enum OtpError {
    #[error("No OTP was requested for this email")]
    NotRequested,

    #[error("OTP expired")]
    Expired,

    #[error("Invalid OTP")]
    Mismatch,

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error("Failed to generate OTP")]
    Rng,
}

impl From<OtpError> for AppError {
    fn from(err: OtpError) -> Self {
        match err {
            OtpError::NotRequested | OtpError::Expired | OtpError::Mismatch => {
                AppError::invalid(err.to_string())
            }
            OtpError::Repo(repo) => repo.into(),
            OtpError::Rng => AppError::internal(err.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct OtpService {
    repo: OtpRepository,
    expiry_minutes: i64,
}

impl OtpService {
    pub fn new(repo: OtpRepository, expiry_minutes: i64) -> Self {
        Self {
            repo,
            expiry_minutes,
        }
    }

    /// Issue a fresh code for `email`, replacing any outstanding one.
    pub async fn issue(&self, email: &str) -> Result<OtpRecord, OtpError> {
        let code = generate_code()?;
        let record = OtpRecord {
            id: None,
            email: email.trim().to_lowercase(),
            code,
            expires_at: Utc::now() + Duration::minutes(self.expiry_minutes),
        };
        Ok(self.repo.upsert(record).await?)
    }

    /// Check `code` against the pending record without consuming it.
    ///
    /// Expired records are deleted on sight so they cannot be retried.
    pub async fn verify(&self, email: &str, code: &str) -> Result<(), OtpError> {
        let record = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or(OtpError::NotRequested)?;

        if record.is_expired(Utc::now()) {
            self.repo.delete(email).await?;
            return Err(OtpError::Expired);
        }

        if ring::constant_time::verify_slices_are_equal(record.code.as_bytes(), code.as_bytes())
            .is_err()
        {
            return Err(OtpError::Mismatch);
        }
        Ok(())
    }

    /// Verify and burn the code in one step; each code is single-use.
    pub async fn consume(&self, email: &str, code: &str) -> Result<(), OtpError> {
        self.verify(email, code).await?;
        self.repo.delete(email).await?;
        Ok(())
    }
}

/// Six decimal digits, zero-padded
fn generate_code() -> Result<String, OtpError> {
    let rng = SystemRandom::new();
    let mut bytes = [0u8; 4];
    rng.fill(&mut bytes).map_err(|_| OtpError::Rng)?;
    let value = u32::from_be_bytes(bytes) % 10u32.pow(CODE_LEN);
    Ok(format!("{:06}", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn service(expiry_minutes: i64) -> OtpService {
        let database = db::connect_memory().await.unwrap();
        OtpService::new(OtpRepository::new(database), expiry_minutes)
    }

    #[test]
    fn generated_codes_are_six_digits() {
        for _ in 0..32 {
            let code = generate_code().unwrap();
            assert_eq!(code.len(), 6);
            assert!(code.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[tokio::test]
    async fn issued_code_verifies_once() {
        let service = service(10).await;
        let record = service.issue("user@example.com").await.unwrap();

        service
            .consume("user@example.com", &record.code)
            .await
            .unwrap();

        // Single use: the same code is gone afterwards
        let err = service
            .consume("user@example.com", &record.code)
            .await
            .unwrap_err();
        assert!(matches!(err, OtpError::NotRequested));
    }

    #[tokio::test]
    async fn wrong_code_is_rejected_but_kept() {
        let service = service(10).await;
        let record = service.issue("user@example.com").await.unwrap();

        // Flip one digit so the guess is always wrong
        let mut wrong = record.code.clone().into_bytes();
        wrong[0] = if wrong[0] == b'9' { b'0' } else { wrong[0] + 1 };
        let wrong = String::from_utf8(wrong).unwrap();

        let err = service
            .verify("user@example.com", &wrong)
            .await
            .unwrap_err();
        assert!(matches!(err, OtpError::Mismatch));

        // A failed guess does not burn the real code
        service
            .verify("user@example.com", &record.code)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn expired_code_is_deleted() {
        let service = service(-1).await;
        let record = service.issue("user@example.com").await.unwrap();

        let err = service
            .verify("user@example.com", &record.code)
            .await
            .unwrap_err();
        assert!(matches!(err, OtpError::Expired));

        let err = service
            .verify("user@example.com", &record.code)
            .await
            .unwrap_err();
        assert!(matches!(err, OtpError::NotRequested));
    }

    #[tokio::test]
    async fn reissuing_replaces_the_old_code() {
        let service = service(10).await;
        let first = service.issue("user@example.com").await.unwrap();
        let second = service.issue("user@example.com").await.unwrap();

        if first.code != second.code {
            let err = service
                .verify("user@example.com", &first.code)
                .await
                .unwrap_err();
            assert!(matches!(err, OtpError::Mismatch));
        }
        service
            .verify("user@example.com", &second.code)
            .await
            .unwrap();
    }
}
