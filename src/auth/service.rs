use std::sync::Arc;

use uuid::Uuid;

use crate::auth::password::PasswordHasher;
use crate::auth::token::TokenService;
use crate::db::operations::CredentialStore;
use crate::error::{AppError, AuthError, DatabaseError};

/// Successful signup or login: the public identity plus a fresh bearer
/// token. Neither the account id nor the password hash leaves the service.
#[derive(Debug)]
pub struct Authenticated {
    pub username: String,
    pub token: String,
}

pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        hasher: PasswordHasher,
        tokens: TokenService,
    ) -> Self {
        Self {
            credentials,
            hasher,
            tokens,
        }
    }

    pub async fn signup(&self, username: &str, password: &str) -> Result<Authenticated, AppError> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::ValidationError(
                "username and password are required".into(),
            ));
        }

        if self
            .credentials
            .find_account_by_username(username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("user already exists".into()));
        }

        let password_hash = self.hasher.hash(password)?;

        let account = match self.credentials.create_account(username, &password_hash).await {
            Ok(account) => account,
            // Lost a concurrent race past the pre-check; the unique index is
            // the authority and the outcome is the same conflict
            Err(AppError::DatabaseError(DatabaseError::Duplicate)) => {
                return Err(AppError::Conflict("user already exists".into()));
            }
            Err(e) => return Err(e),
        };

        let token = self.tokens.issue(account.id)?;

        Ok(Authenticated {
            username: account.username,
            token,
        })
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Authenticated, AppError> {
        // An unknown username and a wrong password fail identically so the
        // response cannot be used to enumerate accounts
        let account = self
            .credentials
            .find_account_by_username(username)
            .await?
            .ok_or(AppError::AuthError(AuthError::InvalidCredentials))?;

        if !self.hasher.verify(password, &account.password_hash) {
            return Err(AppError::AuthError(AuthError::InvalidCredentials));
        }

        let token = self.tokens.issue(account.id)?;

        Ok(Authenticated {
            username: account.username,
            token,
        })
    }

    /// Verifies a presented bearer token and recovers the account id it was
    /// issued for.
    pub fn validate_token(&self, token: &str) -> Result<Uuid, AppError> {
        self.tokens.validate(token)
    }
}
