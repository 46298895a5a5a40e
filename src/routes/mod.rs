pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::{web, HttpResponse};

/// Registers every route of the application.
///
/// `/done/{id}` and `/delete/{id}` answer any method, so plain links in the
/// task list work as well as form posts.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(tasks::home)
        .service(tasks::index)
        .service(auth::signup_form)
        .service(auth::signup)
        .service(auth::login_form)
        .service(auth::login)
        .service(tasks::add_task)
        .service(tasks::add_task_redirect)
        .route("/done/{id}", web::route().to(tasks::complete_task))
        .route("/delete/{id}", web::route().to(tasks::remove_task));
}

pub(crate) fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}
