//! In-memory store implementations backing the API tests.

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use camp_explorer_server::config::{
    AuthConfig, CorsConfig, DatabaseConfig, ServerConfig, Settings,
};
use camp_explorer_server::db::models::{Account, Camp, CampUpdate, NewCamp};
use camp_explorer_server::error::{AppError, DatabaseError};
use camp_explorer_server::{AppState, CampStore, CredentialStore};

#[derive(Default)]
pub struct InMemoryCredentialStore {
    accounts: RwLock<Vec<Account>>,
}

impl InMemoryCredentialStore {
    /// Exposes the stored hash so tests can assert it survives a rejected
    /// duplicate signup.
    pub async fn stored_hash(&self, username: &str) -> Option<String> {
        self.accounts
            .read()
            .await
            .iter()
            .find(|account| account.username == username)
            .map(|account| account.password_hash.clone())
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        Ok(self
            .accounts
            .read()
            .await
            .iter()
            .find(|account| account.username == username)
            .cloned())
    }

    async fn create_account(&self, username: &str, password_hash: &str) -> Result<Account, AppError> {
        let mut accounts = self.accounts.write().await;

        // Mirrors the database unique index
        if accounts.iter().any(|account| account.username == username) {
            return Err(AppError::DatabaseError(DatabaseError::Duplicate));
        }

        let account = Account::new(username.to_string(), password_hash.to_string());
        accounts.push(account.clone());
        Ok(account)
    }
}

#[derive(Default)]
pub struct InMemoryCampStore {
    camps: RwLock<HashMap<Uuid, Camp>>,
}

#[async_trait]
impl CampStore for InMemoryCampStore {
    async fn list_camps(&self) -> Result<Vec<Camp>, AppError> {
        let camps = self.camps.read().await;
        let mut all: Vec<Camp> = camps.values().cloned().collect();
        all.sort_by_key(|camp| camp.created_at);
        Ok(all)
    }

    async fn get_camp(&self, id: Uuid) -> Result<Option<Camp>, AppError> {
        Ok(self.camps.read().await.get(&id).cloned())
    }

    async fn create_camp(&self, new_camp: NewCamp) -> Result<Camp, AppError> {
        let now = Utc::now();
        let camp = Camp {
            id: Uuid::new_v4(),
            title: new_camp.title,
            location: Some(new_camp.location),
            description: Some(new_camp.description),
            price: Some(new_camp.price),
            image: new_camp.image,
            created_at: now,
            updated_at: now,
        };
        self.camps.write().await.insert(camp.id, camp.clone());
        Ok(camp)
    }

    async fn update_camp(&self, id: Uuid, update: CampUpdate) -> Result<Option<Camp>, AppError> {
        let mut camps = self.camps.write().await;
        let Some(camp) = camps.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = update.title {
            camp.title = title;
        }
        if let Some(location) = update.location {
            camp.location = Some(location);
        }
        if let Some(description) = update.description {
            camp.description = Some(description);
        }
        if let Some(price) = update.price {
            camp.price = Some(price);
        }
        if let Some(image) = update.image {
            camp.image = Some(image);
        }
        camp.updated_at = Utc::now();

        Ok(Some(camp.clone()))
    }

    async fn delete_camp(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.camps.write().await.remove(&id).is_some())
    }
}

pub fn test_settings() -> Settings {
    Settings {
        environment: "test".to_string(),
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
            workers: 1,
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
        },
        auth: AuthConfig {
            jwt_secret: "test_secret".to_string(),
            token_ttl_days: 7,
            bcrypt_cost: 4,
        },
        cors: CorsConfig {
            enabled: false,
            allow_any_origin: false,
            max_age: 3600,
        },
    }
}

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub credentials: Arc<InMemoryCredentialStore>,
    pub camps: Arc<InMemoryCampStore>,
}

pub fn test_state() -> TestContext {
    let credentials = Arc::new(InMemoryCredentialStore::default());
    let camps = Arc::new(InMemoryCampStore::default());
    let state = AppState::from_parts(test_settings(), credentials.clone(), camps.clone());

    TestContext {
        state: web::Data::new(state),
        credentials,
        camps,
    }
}
