pub mod extractors;
pub mod middleware;
pub mod password;
pub mod session;

use actix_web::cookie::Cookie;
use std::sync::Arc;
use validator::Validate;

use crate::error::AppError;
use crate::models::{CredentialsForm, UserId};
use crate::store::{CredentialStore, StoreError};

// Re-export necessary items
pub use extractors::AuthenticatedUserId;
pub use middleware::SessionMiddleware;
pub use password::{hash_password, verify_password};
pub use session::{Claims, SessionManager, SESSION_COOKIE};

/// Runs CPU-bound password work on the blocking pool.
async fn off_worker<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::InternalServerError(format!("password task failed: {}", e)))
}

/// Signup and login.
///
/// Signing up never signs the user in; only a successful [`AuthService::login`]
/// produces a session cookie.
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    sessions: SessionManager,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        sessions: SessionManager,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            credentials,
            sessions,
            bcrypt_cost,
        }
    }

    /// Creates an account and returns its id.
    ///
    /// A taken username is [`AppError::DuplicateUsername`]; any other storage
    /// failure fails the request as [`AppError::Storage`].
    pub async fn signup(&self, form: &CredentialsForm) -> Result<UserId, AppError> {
        form.validate()?;

        let password = form.password.clone();
        let cost = self.bcrypt_cost;
        let password_hash = off_worker(move || hash_password(&password, cost)).await??;

        match self.credentials.create(&form.username, &password_hash).await {
            Ok(user_id) => {
                log::info!("registered user {} ({})", form.username, user_id);
                Ok(user_id)
            }
            Err(StoreError::Conflict(_)) => {
                log::info!("signup rejected, username {} is taken", form.username);
                Err(AppError::DuplicateUsername)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Checks the credentials and returns the session cookie to hand to the client.
    ///
    /// Unknown usernames, wrong passwords and unreadable stored hashes all
    /// come back as the same [`AppError::AuthenticationFailed`].
    pub async fn login(&self, form: &CredentialsForm) -> Result<Cookie<'static>, AppError> {
        let stored = match self.credentials.find_by_username(&form.username).await {
            Ok(stored) => stored,
            Err(StoreError::NotFound) => {
                log::warn!("login failed for {}", form.username);
                return Err(AppError::AuthenticationFailed);
            }
            Err(e) => return Err(e.into()),
        };

        let password = form.password.clone();
        let hash = stored.password_hash.clone();
        match off_worker(move || verify_password(&password, &hash)).await? {
            Ok(true) => {}
            Ok(false) => {
                log::warn!("login failed for {}", form.username);
                return Err(AppError::AuthenticationFailed);
            }
            Err(e) => {
                log::error!("stored hash for user {} is unusable: {}", stored.id, e);
                return Err(AppError::AuthenticationFailed);
            }
        }

        log::info!("user {} logged in", stored.id);
        self.sessions.establish(stored.id)
    }
}
