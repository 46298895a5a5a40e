use actix_web::{get, http::StatusCode, post, web, HttpResponse, Responder};

use super::html;
use crate::{
    auth::AuthenticatedUserId,
    context::AppContext,
    error::{redirect, AppError},
    models::{TaskForm, TaskId, UserId},
    views,
};

fn identity(user: Option<AuthenticatedUserId>) -> Option<UserId> {
    user.map(|AuthenticatedUserId(id)| id)
}

/// The signed-in user's task list. Anonymous visitors go to `/index`.
#[get("/")]
pub async fn home(
    ctx: web::Data<AppContext>,
    user: Option<AuthenticatedUserId>,
) -> Result<HttpResponse, AppError> {
    match ctx.tasks.list_tasks(identity(user)).await {
        Ok(tasks) => Ok(html(views::task_list_page(&tasks))),
        Err(AppError::Unauthenticated) => Ok(redirect(StatusCode::FOUND, "/index")),
        Err(e) => Err(e),
    }
}

/// Landing page for visitors without a session.
#[get("/index")]
pub async fn index() -> impl Responder {
    html(views::landing_page())
}

#[post("/add")]
pub async fn add_task(
    ctx: web::Data<AppContext>,
    user: Option<AuthenticatedUserId>,
    form: web::Form<TaskForm>,
) -> Result<HttpResponse, AppError> {
    ctx.tasks.add_task(identity(user), &form.task).await?;
    Ok(redirect(StatusCode::FOUND, "/"))
}

#[get("/add")]
pub async fn add_task_redirect(user: Option<AuthenticatedUserId>) -> HttpResponse {
    match user {
        Some(_) => redirect(StatusCode::FOUND, "/"),
        None => redirect(StatusCode::FOUND, "/login"),
    }
}

/// Marks one of the caller's tasks done. Mounted for any method on `/done/{id}`.
pub async fn complete_task(
    ctx: web::Data<AppContext>,
    user: Option<AuthenticatedUserId>,
    task_id: web::Path<TaskId>,
) -> Result<HttpResponse, AppError> {
    ctx.tasks
        .complete_task(identity(user), task_id.into_inner())
        .await?;
    Ok(redirect(StatusCode::FOUND, "/"))
}

/// Deletes one of the caller's tasks. Mounted for any method on `/delete/{id}`.
pub async fn remove_task(
    ctx: web::Data<AppContext>,
    user: Option<AuthenticatedUserId>,
    task_id: web::Path<TaskId>,
) -> Result<HttpResponse, AppError> {
    ctx.tasks
        .remove_task(identity(user), task_id.into_inner())
        .await?;
    Ok(redirect(StatusCode::FOUND, "/"))
}
