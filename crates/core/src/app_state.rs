use crate::client::ApiClient;
use crate::mirror::OfflineMirror;
use crate::session::Session;
use payrail_primitives::error::ApiError;
pub use payrail_primitives::models::config::ClientConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub client: ApiClient,
    pub session: Arc<Session>,
    pub mirror: Arc<OfflineMirror>,
    pub config: ClientConfig,
}

impl AppState {
    pub fn new(config: ClientConfig) -> Result<Arc<Self>, ApiError> {
        Self::with_session(config, Arc::new(Session::new()))
    }

    pub fn with_session(config: ClientConfig, session: Arc<Session>) -> Result<Arc<Self>, ApiError> {
        let client = ApiClient::new(config.clone(), session.clone())?;

        Ok(Arc::new(Self {
            client,
            session,
            mirror: Arc::new(OfflineMirror::new()),
            config,
        }))
    }

    /// Local teardown for a signed-out user: token and cached mirrors go together.
    pub fn end_session(&self) {
        self.session.sign_out();
        self.mirror.clear();
    }
}
