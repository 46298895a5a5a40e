use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;
use crate::models::UserId;

/// The signed-in user's id, as resolved by `SessionMiddleware`.
///
/// Take `Option<AuthenticatedUserId>` in a handler to receive `None` for
/// anonymous requests instead of an immediate redirect to `/login`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUserId(pub UserId);

impl FromRequest for AuthenticatedUserId {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUserId>().copied() {
            Some(user) => ready(Ok(user)),
            None => ready(Err(AppError::Unauthenticated.into())),
        }
    }
}
