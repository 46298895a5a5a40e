use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use serde_json::json;

use crate::context::AppContext;

/// Health check endpoint
///
/// Reports whether the task store answers, with the current timestamp.
/// Responds `503` when the database cannot be reached.
#[get("/health")]
pub async fn health(ctx: web::Data<AppContext>) -> HttpResponse {
    match ctx.tasks.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "database": "ok",
            "timestamp": Utc::now()
        })),
        Err(e) => {
            log::error!("health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "degraded",
                "database": "unavailable",
                "timestamp": Utc::now()
            }))
        }
    }
}
