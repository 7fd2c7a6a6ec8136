use crate::abort::AbortSignal;
use crate::session::Session;
use http::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::config::ClientConfig;
use payrail_primitives::models::dtos::response_dto::{ApiResponse, SafeResponse};
use reqwest::{Client, Url};
use url::ParseError;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};
use uuid::Uuid;

pub const IDEMPOTENCY_KEY: &str = "idempotency-key";

/// One automatic re-attempt after a retryable failure.
pub const MAX_RETRIES: u32 = 1;

const API_SEGMENT: &str = "api";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IdempotencyKey {
    #[default]
    Auto,
    Provided(String),
    Disabled,
}

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub body: Option<Value>,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub signal: Option<AbortSignal>,
    pub timeout: Option<Duration>,
    pub idempotency: IdempotencyKey,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(mut self, body: impl Serialize) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Flattens a serializable struct into query pairs, skipping nulls.
    pub fn query(mut self, params: impl Serialize) -> Result<Self, ApiError> {
        if let Value::Object(map) = serde_json::to_value(params)? {
            for (key, value) in map {
                let rendered = match value {
                    Value::Null => continue,
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                self.query.push((key, rendered));
            }
        }
        Ok(self)
    }

    pub fn signal(mut self, signal: AbortSignal) -> Self {
        self.signal = Some(signal);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency = IdempotencyKey::Provided(key.into());
        self
    }

    pub fn without_idempotency_key(mut self) -> Self {
        self.idempotency = IdempotencyKey::Disabled;
        self
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    config: ClientConfig,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: Arc<Session>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Self::with_http(http, config, session)
    }

    pub fn with_http(
        http: Client,
        config: ClientConfig,
        session: Arc<Session>,
    ) -> Result<Self, ApiError> {
        let base_url = resolve_base_url(&config)?;

        Ok(Self {
            http,
            base_url,
            config,
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        join_url(&self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.request(Method::GET, path, RequestOptions::new()).await
    }

    pub async fn post(&self, path: &str, body: impl Serialize) -> Result<ApiResponse, ApiError> {
        self.request(Method::POST, path, RequestOptions::new().json(body)?)
            .await
    }

    pub async fn patch(&self, path: &str, body: impl Serialize) -> Result<ApiResponse, ApiError> {
        self.request(Method::PATCH, path, RequestOptions::new().json(body)?)
            .await
    }

    pub async fn put(&self, path: &str, body: impl Serialize) -> Result<ApiResponse, ApiError> {
        self.request(Method::PUT, path, RequestOptions::new().json(body)?)
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.request(Method::DELETE, path, RequestOptions::new()).await
    }

    /// Non-throwing variant of [`ApiClient::request`].
    pub async fn try_request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> SafeResponse {
        self.request(method, path, options).await.into()
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.endpoint(path)?;
        let timeout = options.timeout.unwrap_or(self.config.request_timeout);
        // Built once so the retry carries the same Idempotency-Key.
        let headers = self.build_headers(&method, &options)?;

        let mut last_error = None;

        for attempt in 0..=MAX_RETRIES {
            debug!(method = %method, url = %url, attempt, "Dispatching API request");

            match self.execute(&method, &url, &headers, &options, timeout).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_retryable() && attempt < MAX_RETRIES => {
                    warn!(
                        method = %method,
                        url = %url,
                        error = %err,
                        "Retryable API failure; retrying once"
                    );
                }
                Err(err) => {
                    error!(
                        method = %method,
                        url = %url,
                        status = err.status().map(|s| s.as_u16()),
                        error = %err,
                        "API request failed"
                    );
                    last_error = Some(err);
                    break;
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| ApiError::Config(format!("No attempt was made for {}", url))))
    }

    fn build_headers(
        &self,
        method: &Method,
        options: &RequestOptions,
    ) -> Result<HeaderMap, ApiError> {
        let mut headers = options.headers.clone();

        if options.body.is_some() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        if !headers.contains_key(AUTHORIZATION) {
            if let Some(token) = self.session.token() {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                    .map_err(|_| {
                        ApiError::Config("Session token is not a valid header value".into())
                    })?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
        }

        if is_mutating(method) && !headers.contains_key(IDEMPOTENCY_KEY) {
            let key = match &options.idempotency {
                IdempotencyKey::Provided(key) => Some(key.clone()),
                IdempotencyKey::Auto if self.config.idempotency_keys => {
                    Some(Uuid::new_v4().to_string())
                }
                _ => None,
            };

            if let Some(key) = key {
                let value = HeaderValue::from_str(&key)
                    .map_err(|_| ApiError::Validation("Invalid Idempotency-Key value".into()))?;
                headers.insert(HeaderName::from_static(IDEMPOTENCY_KEY), value);
            }
        }

        Ok(headers)
    }

    async fn execute(
        &self,
        method: &Method,
        url: &Url,
        headers: &HeaderMap,
        options: &RequestOptions,
        timeout: Duration,
    ) -> Result<ApiResponse, ApiError> {
        if let Some(reason) = options.signal.as_ref().and_then(AbortSignal::reason) {
            return Err(ApiError::Aborted {
                url: url.to_string(),
                reason: reason.to_string(),
            });
        }

        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .headers(headers.clone());

        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }

        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        let send = async {
            let resp = builder
                .send()
                .await
                .map_err(|e| ApiError::network(url, e))?;
            read_response(url, resp).await
        };

        let caller_abort = async {
            match &options.signal {
                Some(signal) => signal.aborted().await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            result = send => result,
            _ = tokio::time::sleep(timeout) => Err(ApiError::Timeout {
                url: url.to_string(),
                after: timeout,
            }),
            reason = caller_abort => Err(ApiError::Aborted {
                url: url.to_string(),
                reason: reason.to_string(),
            }),
        }
    }
}

fn is_mutating(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PATCH | Method::PUT)
}

async fn read_response(url: &Url, resp: reqwest::Response) -> Result<ApiResponse, ApiError> {
    let status = resp.status();

    let is_json = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.to_ascii_lowercase().contains("json"))
        .unwrap_or(false);

    let text = resp.text().await.map_err(|e| ApiError::network(url, e))?;

    let data = if is_json {
        serde_json::from_str::<Value>(&text).ok()
    } else {
        None
    };

    if status.is_success() {
        return Ok(ApiResponse {
            status,
            url: url.clone(),
            data,
        });
    }

    let body = data.or_else(|| (!text.trim().is_empty()).then(|| Value::String(text)));

    let message = body
        .as_ref()
        .and_then(server_message)
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

    Err(ApiError::Http {
        status,
        url: url.to_string(),
        message,
        body,
    })
}

fn server_message(body: &Value) -> Option<String> {
    match body {
        Value::String(s) => Some(s.chars().take(200).collect()),
        Value::Object(map) => ["message", "error", "detail"].iter().find_map(|key| {
            match map.get(*key) {
                Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
                Some(Value::Object(inner)) => inner
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            }
        }),
        _ => None,
    }
}

/// Absolute base URLs are used as-is; relative ones hang off the app origin.
pub fn resolve_base_url(config: &ClientConfig) -> Result<Url, ApiError> {
    let raw = config.api_base_url.trim();

    match Url::parse(raw) {
        Ok(url) if url.cannot_be_a_base() => {
            return Err(ApiError::Config(format!(
                "API base URL {} cannot be used as a base",
                raw
            )));
        }
        Ok(url) => return Ok(url),
        // Only a path-like value hangs off the origin; a broken absolute URL is fatal.
        Err(ParseError::RelativeUrlWithoutBase) => {}
        Err(e) => {
            return Err(ApiError::Config(format!(
                "API base URL {:?} is malformed: {}",
                raw, e
            )));
        }
    }

    let origin = Url::parse(config.app_origin.trim()).map_err(|e| {
        ApiError::Config(format!(
            "App origin {:?} is not a valid URL: {}",
            config.app_origin, e
        ))
    })?;

    let path = format!("/{}", raw.trim_start_matches('/'));
    origin
        .join(&path)
        .map_err(|e| ApiError::Config(format!("API base URL {:?} is malformed: {}", raw, e)))
}

/// Appends `path` to the base, dropping a repeated leading `/api`.
pub fn join_url(base: &Url, path: &str) -> Result<Url, ApiError> {
    let (path, query) = match path.trim().split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (path.trim(), None),
    };

    let base_path = base.path().trim_end_matches('/');
    let mut relative = path.trim_start_matches('/');

    if base_path.rsplit('/').next() == Some(API_SEGMENT) {
        if relative == API_SEGMENT {
            relative = "";
        } else if let Some(rest) = relative.strip_prefix("api/") {
            relative = rest;
        }
    }

    let mut joined = if relative.is_empty() {
        base_path.to_string()
    } else {
        format!("{}/{}", base_path, relative)
    };

    if joined.is_empty() {
        joined.push('/');
    }

    if let Some(query) = query {
        joined.push('?');
        joined.push_str(query);
    }

    base.join(&joined).map_err(|e| {
        ApiError::Config(format!(
            "Request URL for {:?} could not be built from {}: {}",
            path, base, e
        ))
    })
}
