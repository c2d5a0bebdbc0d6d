use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::password::PasswordHasher;
use crate::auth::token::{TokenCodec, TokenKind};
use crate::db::UserRepository;
use crate::error::{AppError, AuthError, DatabaseError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenCodec>,
    hasher: PasswordHasher,
    // Verified against when the username is unknown, so a miss costs the
    // same as a wrong password.
    dummy_hash: String,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<TokenCodec>,
        hasher: PasswordHasher,
    ) -> Result<Self, AppError> {
        let dummy_hash = hasher.hash("dummy password")?;
        Ok(Self {
            users,
            tokens,
            hasher,
            dummy_hash,
        })
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<(), AppError> {
        if username.is_empty() {
            return Err(AppError::ValidationError("username must not be empty".into()));
        }
        if password.is_empty() {
            return Err(AppError::ValidationError("password must not be empty".into()));
        }

        let password_hash = self.hasher.hash_blocking(password.to_string()).await?;

        match self.users.create_user(username, &password_hash).await {
            Ok(user) => {
                info!(user_id = user.id, "Registered user {}", user.username);
                Ok(())
            }
            Err(DatabaseError::Duplicate) => Err(AppError::DuplicateUser(username.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AppError> {
        let user = self.users.get_user_by_username(username).await?;

        let (stored_hash, user) = match user {
            Some(user) => (user.password_hash.clone(), Some(user)),
            None => (self.dummy_hash.clone(), None),
        };
        let matches = self
            .hasher
            .verify_blocking(password.to_string(), stored_hash)
            .await?;

        let user = match user {
            Some(user) if matches => user,
            _ => {
                warn!("Rejected login for {}", username);
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        let pair = self.issue_pair(user.id).await?;
        info!(user_id = user.id, "User {} logged in", user.username);
        Ok(pair)
    }

    /// Exchanges the current refresh token for a fresh pair. The presented
    /// token stops working as soon as this succeeds.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.tokens.validate(refresh_token)?;
        claims.require_kind(TokenKind::Refresh)?;
        let user_id = claims.user_id()?;

        let user = self
            .users
            .get_user_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if user.refresh_token.as_deref() != Some(refresh_token) {
            warn!(user_id, "Rejected superseded refresh token");
            return Err(AuthError::InvalidToken.into());
        }

        let pair = self.issue_pair(user.id).await?;
        info!(user_id, "Rotated refresh token");
        Ok(pair)
    }

    pub fn tokens(&self) -> &TokenCodec {
        &self.tokens
    }

    async fn issue_pair(&self, user_id: i32) -> Result<TokenPair, AppError> {
        let access_token = self.tokens.issue_access(user_id)?;
        let refresh_token = self.tokens.issue_refresh(user_id)?;
        self.users
            .update_refresh_token(user_id, &refresh_token)
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}
