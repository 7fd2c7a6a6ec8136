pub mod utility;

pub use payrail_core::services::account_service::AccountService;
pub use payrail_core::services::admin_service::AdminService;
pub use payrail_core::services::auth_service::AuthService;
pub use payrail_core::services::onboarding_service::OnboardingService;
pub use payrail_core::services::otp_service::OtpService;
pub use payrail_core::services::transfer_service::TransferService;
pub use payrail_core::{AbortController, ApiClient, AppState, RequestOptions, Session};
pub use payrail_primitives::error::ApiError;
pub use payrail_primitives::models::config::ClientConfig;

pub use crate::utility::env::load_env;
pub use crate::utility::logging::setup_logging;
use eyre::Report;
use std::sync::Arc;
use tracing::info;

/// Environment, logging and configuration in one step, for embedding apps.
pub fn init() -> Result<Arc<AppState>, Report> {
    // 1. load environment variables
    load_env();

    // 2. initialize logging first (so we can log everything else)
    setup_logging();

    // 3. build the client
    bootstrap()
}

/// Builds a ready client from `PAYRAIL_*` variables without touching global logging.
pub fn bootstrap() -> Result<Arc<AppState>, Report> {
    let config = ClientConfig::from_env()?;

    info!(
        base_url = %config.api_base_url,
        timeout_ms = config.request_timeout.as_millis() as u64,
        "Payrail client configured"
    );

    let state = AppState::new(config)?;

    info!(resolved = %state.client.base_url(), "Payrail client ready");
    Ok(state)
}
