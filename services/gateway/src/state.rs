use std::sync::Arc;

use crate::appwrite::AppwriteClient;
use crate::config::Config;
use crate::repository::ProfileRepository;
use crate::services::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: Arc<AuthService>,
    pub profiles: Arc<dyn ProfileRepository>,
    /// `None` when the hosted backend is not configured (degraded mode)
    pub appwrite: Option<Arc<AppwriteClient>>,
}

impl AppState {
    pub fn new(
        config: Config,
        auth: Arc<AuthService>,
        profiles: Arc<dyn ProfileRepository>,
        appwrite: Option<Arc<AppwriteClient>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            auth,
            profiles,
            appwrite,
        }
    }
}
