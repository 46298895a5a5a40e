use actix_web::{get, http::StatusCode, post, web, HttpResponse, Responder};
use serde::Deserialize;

use super::html;
use crate::{
    context::AppContext,
    error::{redirect, AppError},
    models::CredentialsForm,
    views,
};

/// `?error=` code set by a failed form post, shown above the form.
#[derive(Debug, Deserialize)]
pub struct Notice {
    pub error: Option<String>,
}

impl Notice {
    fn signup_message(&self) -> Option<&'static str> {
        match self.error.as_deref()? {
            "taken" => Some("That username is already taken."),
            "invalid" => Some("Username and password are required."),
            _ => None,
        }
    }

    fn login_message(&self) -> Option<&'static str> {
        match self.error.as_deref()? {
            "invalid" => Some("Invalid username or password."),
            _ => None,
        }
    }
}

#[get("/signup")]
pub async fn signup_form(notice: web::Query<Notice>) -> impl Responder {
    html(views::signup_page(notice.signup_message()))
}

/// Creates the account and sends the user on to the login form.
///
/// Signing up does not start a session.
#[post("/signup")]
pub async fn signup(
    ctx: web::Data<AppContext>,
    form: web::Form<CredentialsForm>,
) -> Result<HttpResponse, AppError> {
    match ctx.auth.signup(&form).await {
        Ok(_) => Ok(redirect(StatusCode::SEE_OTHER, "/login")),
        Err(AppError::ValidationError(_)) => {
            Ok(redirect(StatusCode::SEE_OTHER, "/signup?error=invalid"))
        }
        Err(e) => Err(e),
    }
}

#[get("/login")]
pub async fn login_form(notice: web::Query<Notice>) -> impl Responder {
    html(views::login_page(notice.login_message()))
}

/// Checks the credentials, sets the session cookie and goes to the task list.
///
/// Any failure redirects back to `/login?error=invalid`, whatever the cause.
#[post("/login")]
pub async fn login(
    ctx: web::Data<AppContext>,
    form: web::Form<CredentialsForm>,
) -> Result<HttpResponse, AppError> {
    let cookie = ctx.auth.login(&form).await?;

    let mut response = redirect(StatusCode::FOUND, "/");
    response
        .add_cookie(&cookie)
        .map_err(|e| AppError::InternalServerError(format!("Failed to set session: {}", e)))?;
    Ok(response)
}
