#![doc = "The `tasklist` library crate."]
#![doc = ""]
#![doc = "A small multi-user task list: accounts, cookie sessions and per-user tasks."]
#![doc = "The binary (`main.rs`) wires the PostgreSQL stores, the `AppContext` and the"]
#![doc = "actix-web routes together; the tests do the same with the in-memory stores."]

pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod tasks;
pub mod views;

pub use context::AppContext;
pub use error::AppError;
