//! Shared server state
//!
//! One [`ServerState`] is built at startup and cloned into every handler via
//! axum's state extension. Arc keeps the clones cheap.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db;
use crate::db::repository::OtpRepository;
use crate::mail::Mailer;
use crate::otp::OtpService;
use crate::payment::PaymentGateway;
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    /// `None` when SMTP is unconfigured; reset codes are then returned inline
    pub mailer: Option<Arc<Mailer>>,
    /// `None` when the gateway keys are unconfigured
    pub gateway: Option<Arc<PaymentGateway>>,
}

impl ServerState {
    /// Build the full state for a real server run.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let database = db::connect(&config.data_dir).await?;
        Self::with_db(config.clone(), database)
    }

    /// State over an in-memory database, for tests.
    pub async fn in_memory(config: Config) -> Result<Self, AppError> {
        let database = db::connect_memory().await?;
        Self::with_db(config, database)
    }

    fn with_db(config: Config, database: Surreal<Db>) -> Result<Self, AppError> {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        let mailer = match &config.smtp {
            Some(smtp) => Some(Arc::new(
                Mailer::new(smtp).map_err(|e| AppError::internal(e.to_string()))?,
            )),
            None => None,
        };

        let gateway = config
            .gateway
            .as_ref()
            .map(|g| Arc::new(PaymentGateway::new(g)));

        Ok(Self {
            config,
            db: database,
            jwt_service,
            mailer,
            gateway,
        })
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    pub fn otp_service(&self) -> OtpService {
        OtpService::new(
            OtpRepository::new(self.db.clone()),
            self.config.otp_expiry_minutes,
        )
    }

    /// Whether `email` is the configured master admin account.
    pub fn is_master_admin_email(&self, email: &str) -> bool {
        self.config
            .master_admin_email
            .as_deref()
            .is_some_and(|admin| admin.eq_ignore_ascii_case(email.trim()))
    }
}
