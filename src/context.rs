use std::sync::Arc;

use crate::auth::{AuthService, SessionManager};
use crate::config::Config;
use crate::store::{CredentialStore, TaskStore};
use crate::tasks::TaskService;

/// Everything a request handler needs, built once at startup and shared
/// read-only across workers as `web::Data<AppContext>`.
#[derive(Clone)]
pub struct AppContext {
    pub auth: AuthService,
    pub tasks: TaskService,
    pub session: SessionManager,
}

impl AppContext {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        tasks: Arc<dyn TaskStore>,
        session: SessionManager,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            auth: AuthService::new(credentials, session.clone(), bcrypt_cost),
            tasks: TaskService::new(tasks),
            session,
        }
    }

    pub fn from_config(
        config: &Config,
        credentials: Arc<dyn CredentialStore>,
        tasks: Arc<dyn TaskStore>,
    ) -> Self {
        let session = SessionManager::new(
            config.session_secret.as_bytes(),
            chrono::Duration::hours(config.session_ttl_hours),
        );
        Self::new(credentials, tasks, session, config.bcrypt_cost)
    }
}
