use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

use tasklist::auth::SessionMiddleware;
use tasklist::config::Config;
use tasklist::routes;
use tasklist::store::{PgCredentialStore, PgTaskStore};
use tasklist::AppContext;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(startup_error)?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(config.database_acquire_timeout_secs))
        .connect(&config.database_url)
        .await
        .map_err(startup_error)?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(startup_error)?;

    let ctx = web::Data::new(AppContext::from_config(
        &config,
        Arc::new(PgCredentialStore::new(pool.clone())),
        Arc::new(PgTaskStore::new(pool)),
    ));

    log::info!("Starting server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(ctx.clone())
            .wrap(SessionMiddleware)
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}

fn startup_error<E: std::fmt::Display>(error: E) -> std::io::Error {
    log::error!("startup failed: {}", error);
    std::io::Error::new(std::io::ErrorKind::Other, error.to_string())
}
