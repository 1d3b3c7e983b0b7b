pub mod auth;
pub mod camps;
pub mod config;
pub mod db;
pub mod error;

use std::sync::Arc;
use actix_web::HttpResponse;

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use auth::{AuthService, Authenticated, PasswordHasher, TokenService};
pub use db::{Account, Camp, CampImage, CampStore, CredentialStore, DbOperations};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Application state shared across all components
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub auth_service: Arc<AuthService>,
    pub camps: Arc<dyn CampStore>,
}

impl AppState {
    pub async fn new(config: Settings) -> Result<Self> {
        let db = Arc::new(
            DbOperations::connect(&config.database.url, config.database.max_connections).await?,
        );

        let credentials: Arc<dyn CredentialStore> = db.clone();
        let camps: Arc<dyn CampStore> = db;

        Ok(Self::from_parts(config, credentials, camps))
    }

    /// Assembles state over explicit store implementations. The server uses
    /// `new`; tests inject in-memory stores here.
    pub fn from_parts(
        config: Settings,
        credentials: Arc<dyn CredentialStore>,
        camps: Arc<dyn CampStore>,
    ) -> Self {
        let auth_service = AuthService::new(
            credentials,
            PasswordHasher::new(config.auth.bcrypt_cost),
            TokenService::new(&config.auth.jwt_secret, config.auth.token_ttl_days),
        );

        Self {
            config: Arc::new(config),
            auth_service: Arc::new(auth_service),
            camps,
        }
    }
}
