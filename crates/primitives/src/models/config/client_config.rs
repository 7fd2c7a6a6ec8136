use eyre::{eyre, Report};
use regex::Regex;
use std::env;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_API_BASE_URL: &str = "/api";
pub const DEFAULT_APP_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_USER_AGENT: &str = "Payrail/0.1";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(your[-_ ]|<[^>]*>|\{\{.*\}\}|\$\{.*\}|changeme|change-me|placeholder|example\.com|^undefined$|^null$)",
    )
    .expect("Invalid placeholder regex")
});

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Absolute URL or a path resolved against `app_origin`.
    pub api_base_url: String,

    pub app_origin: String,

    pub request_timeout: Duration,

    pub idempotency_keys: bool,

    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            app_origin: DEFAULT_APP_ORIGIN.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            idempotency_keys: true,
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_base_url: &str) -> Self {
        Self {
            api_base_url: sanitize_base_url(api_base_url),
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, Report> {
        let timeout_ms: u64 = env::var("PAYRAIL_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT.as_millis().to_string())
            .parse()
            .map_err(|e| eyre!("PAYRAIL_REQUEST_TIMEOUT_MS must be a whole number: {}", e))?;

        if timeout_ms == 0 {
            return Err(eyre!("PAYRAIL_REQUEST_TIMEOUT_MS must be greater than zero"));
        }

        Ok(Self {
            api_base_url: sanitize_base_url(
                &env::var("PAYRAIL_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.into()),
            ),

            app_origin: env::var("PAYRAIL_APP_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_APP_ORIGIN.into()),

            request_timeout: Duration::from_millis(timeout_ms),

            idempotency_keys: env::var("PAYRAIL_IDEMPOTENCY_KEYS")
                .map(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "off" | "no"))
                .unwrap_or(true),

            user_agent: env::var("PAYRAIL_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.into()),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.app_origin = origin.into();
        self
    }

    pub fn without_idempotency_keys(mut self) -> Self {
        self.idempotency_keys = false;
        self
    }
}

/// Template leftovers and placeholder text fall back to the relative default.
pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return DEFAULT_API_BASE_URL.into();
    }

    if PLACEHOLDER.is_match(trimmed) {
        warn!(
            configured = %trimmed,
            fallback = DEFAULT_API_BASE_URL,
            "API base URL looks like a placeholder; using relative default"
        );
        return DEFAULT_API_BASE_URL.into();
    }

    let stripped = trimmed.trim_end_matches('/');
    if stripped.is_empty() {
        return "/".into();
    }
    stripped.into()
}
