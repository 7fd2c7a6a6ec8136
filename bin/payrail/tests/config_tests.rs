use payrail::bootstrap;
use payrail_core::app_state::AppState;
use payrail_core::client::{join_url, resolve_base_url};
use payrail_primitives::error::ApiError;
use payrail_primitives::models::config::{sanitize_base_url, ClientConfig, DEFAULT_API_BASE_URL};
use serial_test::serial;
use std::env;
use std::time::Duration;

const VARS: [&str; 5] = [
    "PAYRAIL_API_BASE_URL",
    "PAYRAIL_APP_ORIGIN",
    "PAYRAIL_REQUEST_TIMEOUT_MS",
    "PAYRAIL_IDEMPOTENCY_KEYS",
    "PAYRAIL_USER_AGENT",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_env() {
    clear_env();

    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.request_timeout, Duration::from_secs(20));
    assert!(config.idempotency_keys);

    let base = resolve_base_url(&config).unwrap();
    assert_eq!(base.as_str(), "http://localhost:3000/api");
}

#[test]
#[serial]
fn test_env_overrides() {
    clear_env();
    env::set_var("PAYRAIL_API_BASE_URL", "https://bank.internal/api/");
    env::set_var("PAYRAIL_REQUEST_TIMEOUT_MS", "1500");
    env::set_var("PAYRAIL_IDEMPOTENCY_KEYS", "off");

    let config = ClientConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.api_base_url, "https://bank.internal/api");
    assert_eq!(config.request_timeout, Duration::from_millis(1500));
    assert!(!config.idempotency_keys);
}

#[test]
#[serial]
fn test_invalid_timeout_is_reported() {
    clear_env();

    env::set_var("PAYRAIL_REQUEST_TIMEOUT_MS", "soon");
    assert!(ClientConfig::from_env().is_err());

    env::set_var("PAYRAIL_REQUEST_TIMEOUT_MS", "0");
    assert!(ClientConfig::from_env().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_bootstrap_with_placeholder_base_url() {
    clear_env();
    env::set_var("PAYRAIL_API_BASE_URL", "https://your-api-host/api");
    env::set_var("PAYRAIL_APP_ORIGIN", "https://app.bank.test");

    let state = bootstrap().unwrap();
    clear_env();

    assert_eq!(state.client.base_url().as_str(), "https://app.bank.test/api");
    assert!(!state.session.is_authenticated());
}

#[test]
fn test_placeholder_urls_fall_back() {
    for raw in ["", "   ", "${API_URL}", "{{ api_base }}", "<api-url>", "https://CHANGEME/api", "undefined"] {
        assert_eq!(sanitize_base_url(raw), DEFAULT_API_BASE_URL, "kept {:?}", raw);
    }

    assert_eq!(sanitize_base_url("https://bank.test/api///"), "https://bank.test/api");
    assert_eq!(sanitize_base_url("/"), "/");
}

#[test]
fn test_relative_base_needs_valid_origin() {
    let config = ClientConfig::new("/api").with_origin("not a url");
    assert!(resolve_base_url(&config).is_err());

    let config = ClientConfig::new("v2/api").with_origin("https://bank.test");
    assert_eq!(resolve_base_url(&config).unwrap().as_str(), "https://bank.test/v2/api");
}

#[test]
fn test_malformed_absolute_base_is_rejected() {
    for raw in ["http://", "https://", "https://bank api.test/api"] {
        let config = ClientConfig::new(raw).with_origin("https://app.bank.test");
        let err = resolve_base_url(&config).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)), "resolved {:?}", raw);
    }

    let err = AppState::new(ClientConfig::new("http://")).err();
    assert!(matches!(err, Some(ApiError::Config(_))));
}

#[test]
fn test_join_drops_repeated_api_prefix() {
    let base = resolve_base_url(&ClientConfig::new("https://bank.test/api")).unwrap();

    assert_eq!(join_url(&base, "/transfer/usa").unwrap().as_str(), "https://bank.test/api/transfer/usa");
    assert_eq!(join_url(&base, "/api/transfer/usa").unwrap().as_str(), "https://bank.test/api/transfer/usa");
    assert_eq!(join_url(&base, "auth/me").unwrap().as_str(), "https://bank.test/api/auth/me");
    assert_eq!(
        join_url(&base, "/admin/transfers?status=pending").unwrap().as_str(),
        "https://bank.test/api/admin/transfers?status=pending"
    );
}
