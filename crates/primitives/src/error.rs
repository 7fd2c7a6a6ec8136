use http::StatusCode;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

#[derive(Debug)]
pub enum ApiError {
    Config(String),
    Network {
        url: String,
        source: reqwest::Error,
    },
    Timeout {
        url: String,
        after: Duration,
    },
    Aborted {
        url: String,
        reason: String,
    },
    Http {
        status: StatusCode,
        url: String,
        message: String,
        body: Option<Value>,
    },
    Validation(String),
    InvalidRequest(validator::ValidationErrors),
    Decode(String),
}

impl ApiError {
    pub fn network(url: impl fmt::Display, source: reqwest::Error) -> Self {
        ApiError::Network {
            url: url.to_string(),
            source,
        }
    }

    /// Transport failures, timer-driven timeouts and 5xx responses earn the single retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network { .. } | ApiError::Timeout { .. } => true,
            ApiError::Http { status, .. } => status.is_server_error(),
            _ => false,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Network { source, .. } => source.status(),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Http { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ApiError::Network { url, .. }
            | ApiError::Timeout { url, .. }
            | ApiError::Aborted { url, .. }
            | ApiError::Http { url, .. } => Some(url),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(e) => write!(f, "Configuration error: {}", e),
            ApiError::Network { url, source } => {
                write!(f, "Network error calling {}: {}", url, source)
            }
            ApiError::Timeout { url, after } => write!(
                f,
                "Request to {} timed out after {}ms",
                url,
                after.as_millis()
            ),
            ApiError::Aborted { url, reason } => {
                write!(f, "Request to {} aborted: {}", url, reason)
            }
            ApiError::Http {
                status, message, ..
            } => write!(f, "HTTP {}: {}", status.as_u16(), message),
            ApiError::Validation(e) => write!(f, "Validation error: {}", e),
            ApiError::InvalidRequest(e) => write!(f, "Invalid request: {}", e),
            ApiError::Decode(e) => write!(f, "Decode error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network { source, .. } => Some(source),
            ApiError::InvalidRequest(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        ApiError::Network { url, source: err }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::InvalidRequest(err)
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::Config(format!("Invalid URL: {}", err))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
