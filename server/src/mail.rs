//! Outbound mail
//!
//! A thin wrapper over an SMTP relay, used only for password-reset codes.
//! When SMTP is not configured the server runs without a mailer and the
//! reset endpoint returns the code in the response body instead, which keeps
//! local development working without a relay.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::core::config::SmtpConfig;
use crate::utils::AppError;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid mail address or message: {0}")]
    Build(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),
}

impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        AppError::internal(err.to_string())
    }
}

pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl Mailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: config.from.clone(),
        })
    }

    /// Send the password-reset code to `to`.
    pub async fn send_otp(&self, to: &str, code: &str, expiry_minutes: i64) -> Result<(), MailError> {
        let body = format!(
            "Your password reset code is {code}.\n\n\
             It expires in {expiry_minutes} minutes. If you did not request a \
             reset, you can ignore this email."
        );

        let message = Message::builder()
            .from(self.from.parse().map_err(|e| MailError::Build(format!("{e}")))?)
            .to(to.parse().map_err(|e| MailError::Build(format!("{e}")))?)
            .subject("Your password reset code")
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| MailError::Transport(e.to_string()))
    }
}
