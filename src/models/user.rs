use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

/// Identifier of a row in `users`.
pub type UserId = i32;

/// The stored half of a user's credentials, as read back for login.
#[derive(Debug, Clone, FromRow)]
pub struct Credentials {
    pub id: UserId,
    pub password_hash: String,
}

/// Form body shared by `POST /signup` and `POST /login`.
/// Missing fields read as empty and take the same re-prompt path as blank ones.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsForm {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String, // plaintext, hashed before it reaches a store
}
