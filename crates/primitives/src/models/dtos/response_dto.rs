use crate::error::ApiError;
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

const ENVELOPE_MARKERS: [&str; 4] = ["success", "ok", "status", "message"];

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub url: Url,
    /// Parsed body; `None` unless the response declared JSON and parsed cleanly.
    pub data: Option<Value>,
}

impl ApiResponse {
    /// The body with a `{ success, data }` style envelope peeled off.
    pub fn payload(&self) -> Option<&Value> {
        let data = self.data.as_ref()?;

        match data {
            Value::Object(map) => match map.get("data") {
                Some(inner)
                    if !inner.is_null()
                        && (map.len() == 1
                            || ENVELOPE_MARKERS.iter().any(|k| map.contains_key(*k))) =>
                {
                    Some(inner)
                }
                _ => Some(data),
            },
            _ => Some(data),
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let payload = self
            .payload()
            .ok_or_else(|| ApiError::Decode(format!("Expected a JSON body from {}", self.url)))?;

        serde_json::from_value(payload.clone()).map_err(|e| {
            ApiError::Decode(format!("Unexpected response shape from {}: {}", self.url, e))
        })
    }
}

/// Result of the non-throwing request mode.
#[derive(Debug, Clone)]
pub enum SafeResponse {
    Success {
        status: StatusCode,
        data: Option<Value>,
    },
    Failure {
        error: String,
        status: Option<StatusCode>,
        body: Option<Value>,
    },
}

impl SafeResponse {
    pub fn is_ok(&self) -> bool {
        matches!(self, SafeResponse::Success { .. })
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SafeResponse::Success { status, .. } => Some(*status),
            SafeResponse::Failure { status, .. } => *status,
        }
    }
}

impl From<Result<ApiResponse, ApiError>> for SafeResponse {
    fn from(result: Result<ApiResponse, ApiError>) -> Self {
        match result {
            Ok(response) => SafeResponse::Success {
                status: response.status,
                data: response.data,
            },
            Err(err) => SafeResponse::Failure {
                error: err.to_string(),
                status: err.status(),
                body: err.body().cloned(),
            },
        }
    }
}
