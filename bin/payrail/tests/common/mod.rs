#![allow(dead_code)]

use payrail_core::app_state::AppState;
use payrail_core::session::Session;
use payrail_primitives::models::config::ClientConfig;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use wiremock::{MockServer, Request};

pub const TEST_TIMEOUT: Duration = Duration::from_millis(500);

/// Config pointing at the mock backend's `/api` prefix.
pub fn test_config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(&format!("{}/api", server.uri())).with_timeout(TEST_TIMEOUT)
}

pub fn create_test_app_state(server: &MockServer) -> Arc<AppState> {
    AppState::new(test_config(server)).expect("Failed to build test AppState")
}

pub fn create_signed_in_state(server: &MockServer, token: &str) -> Arc<AppState> {
    AppState::with_session(test_config(server), Arc::new(Session::with_token(token)))
        .expect("Failed to build test AppState")
}

pub async fn received(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}

pub fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

pub fn body_json(request: &Request) -> Value {
    serde_json::from_slice(&request.body).expect("Request body was not JSON")
}
