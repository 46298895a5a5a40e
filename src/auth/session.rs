use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::HttpRequest;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::UserId;

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "session";

/// Represents the claims encoded within a session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The signed-in user's id.
    pub sub: UserId,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiration, seconds since epoch. Matches the cookie's `Max-Age`.
    pub exp: i64,
}

/// Issues and checks session cookies.
///
/// The cookie value is an HS256 token over [`Claims`], signed with the
/// process-wide secret. Nothing is kept server-side: a session exists exactly
/// as long as the client keeps a validly signed, unexpired cookie.
#[derive(Clone)]
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: chrono::Duration,
}

impl SessionManager {
    pub fn new(secret: &[u8], ttl: chrono::Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Signs a session for `user_id` and wraps it in the cookie the client receives.
    pub fn establish(&self, user_id: UserId) -> Result<Cookie<'static>, AppError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: now
                .checked_add_signed(self.ttl)
                .ok_or_else(|| AppError::InternalServerError("session expiry overflows".into()))?
                .timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding_key)?;

        Ok(Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(CookieDuration::seconds(self.ttl.num_seconds()))
            .finish())
    }

    /// The user bound to the request's session cookie, if any.
    pub fn resolve(&self, req: &HttpRequest) -> Option<UserId> {
        let cookie = req.cookie(SESSION_COOKIE)?;
        self.resolve_token(cookie.value())
    }

    /// Verifies a raw cookie value. Any failure (bad signature, expiry,
    /// garbage) means "no session".
    pub fn resolve_token(&self, token: &str) -> Option<UserId> {
        match decode::<Claims>(token, &self.decoding_key, &Validation::default()) {
            Ok(data) => Some(data.claims.sub),
            Err(e) => {
                log::debug!("ignoring invalid session cookie: {}", e);
                None
            }
        }
    }
}
