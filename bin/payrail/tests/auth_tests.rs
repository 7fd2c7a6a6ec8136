mod common;

use common::{body_json, create_signed_in_state, create_test_app_state, header, received};
use payrail_core::services::auth_service::AuthService;
use payrail_core::services::otp_service::OtpService;
use payrail_core::session::Session;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::dtos::auth_dto::{
    LoginRequest, OtpRequest, RegisterRequest, VerifyOtpRequest,
};
use payrail_primitives::models::enum_types::OtpPurpose;
use secrecy::ExposeSecret;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn register_request(password: &str) -> RegisterRequest {
    RegisterRequest {
        email: " New.User@Example.org ".into(),
        password: password.into(),
        first_name: " Ada ".into(),
        last_name: "Lovelace".into(),
        phone: Some("   ".into()),
    }
}

#[tokio::test]
async fn test_login_stores_token_for_later_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_partial_json(json!({ "email": "ada@bank.test" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "accessToken": "tok_abc",
                "user": { "_id": "u1", "email": "ada@bank.test", "role": "ADMIN" }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "id": "u1", "firstName": "Ada", "isFrozen": false }
        })))
        .mount(&server)
        .await;

    let state = create_test_app_state(&server);
    let login = AuthService::login(&state, LoginRequest::new("  ADA@bank.test ", "s3cret!"))
        .await
        .unwrap();

    assert_eq!(login.token.as_deref(), Some("tok_abc"));
    assert!(login.user.as_ref().map(|u| u.is_admin()).unwrap_or(false));
    assert!(state.session.is_authenticated());

    let me = AuthService::me(&state).await.unwrap();
    assert_eq!(me.first_name.as_deref(), Some("Ada"));

    let requests = received(&server).await;
    assert!(header(&requests[0], "authorization").is_none());
    assert!(header(&requests[0], "idempotency-key").is_none());
    assert_eq!(header(&requests[1], "authorization"), Some("Bearer tok_abc"));
}

#[tokio::test]
async fn test_login_accepts_duplicated_key_spellings() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok_1",
            "accessToken": "tok_1",
            "refreshToken": "ref_1",
            "user": { "_id": "u1", "id": "u1", "isFrozen": true, "frozen": true }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = create_test_app_state(&server);
    let login = AuthService::login(&state, LoginRequest::new("ada@bank.test", "s3cret!"))
        .await
        .unwrap();

    assert_eq!(login.token.as_deref(), Some("tok_1"));
    assert_eq!(login.refresh_token.as_deref(), Some("ref_1"));

    let user = login.user.unwrap();
    assert_eq!(user.id.as_deref(), Some("u1"));
    assert!(user.is_frozen);
    assert_eq!(state.session.token().unwrap().expose_secret(), "tok_1");
}

#[tokio::test]
async fn test_login_rejects_invalid_email_without_io() {
    let server = MockServer::start().await;
    let state = create_test_app_state(&server);

    let err = AuthService::login(&state, LoginRequest::new("not-an-email", "pw"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidRequest(_)));
    assert!(received(&server).await.is_empty());
}

#[tokio::test]
async fn test_failed_login_keeps_session_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid credentials" })))
        .expect(1)
        .mount(&server)
        .await;

    let state = create_test_app_state(&server);
    let err = AuthService::login(&state, LoginRequest::new("ada@bank.test", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "HTTP 401: Invalid credentials");
    assert!(!state.session.is_authenticated());
}

#[tokio::test]
async fn test_logout_clears_session_even_when_backend_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let state = create_signed_in_state(&server, "tok_user");
    state.mirror.store("/accounts/balances", json!({ "checking": 1 }));

    AuthService::logout(&state).await.unwrap();

    assert!(!state.session.is_authenticated());
    assert!(state.mirror.is_empty());
}

#[tokio::test]
async fn test_register_enforces_password_policy() {
    let server = MockServer::start().await;
    let state = create_test_app_state(&server);

    for weak in ["short1!", "onlyletters!!", "nosymbols123"] {
        let err = AuthService::register(&state, register_request(weak))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)), "accepted {:?}", weak);
    }

    assert!(received(&server).await.is_empty());
}

#[tokio::test]
async fn test_register_normalizes_and_signs_in() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "token": "tok_new" })))
        .expect(1)
        .mount(&server)
        .await;

    let state = create_test_app_state(&server);
    AuthService::register(&state, register_request("Str0ng#Pass"))
        .await
        .unwrap();

    assert!(state.session.is_authenticated());

    let requests = received(&server).await;
    let body = body_json(&requests[0]);
    assert_eq!(body["email"], json!("new.user@example.org"));
    assert_eq!(body["firstName"], json!("Ada"));
    assert!(body.get("phone").is_none());
    assert!(header(&requests[0], "idempotency-key").is_some());
}

#[tokio::test]
async fn test_refresh_requires_a_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": null })))
        .mount(&server)
        .await;

    let state = create_signed_in_state(&server, "tok_old");
    let err = AuthService::refresh(&state, "rt_1").await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(
        state.session.token().map(|t| t.expose_secret().to_string()),
        Some("tok_old".to_string())
    );
}

#[test]
fn test_session_scope_signs_out_on_drop() {
    let session = Arc::new(Session::new());

    {
        let scope = session.scope("tok_scoped");
        assert!(scope.session().is_authenticated());
    }

    assert!(!session.is_authenticated());
}

#[test]
fn test_blank_token_signs_out() {
    let session = Session::with_token("tok_1");
    session.sign_in("   ");
    assert!(session.token().is_none());
}

#[tokio::test]
async fn test_otp_send_and_verify() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/otp/send"))
        .and(body_partial_json(json!({ "purpose": "transfer" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "channel": "sms", "expiresIn": 300 })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/otp/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "valid": true })))
        .mount(&server)
        .await;

    let state = create_signed_in_state(&server, "tok_user");

    let challenge = OtpService::send(
        &state,
        OtpRequest {
            purpose: OtpPurpose::Transfer,
            reference: Some("tr_1".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(challenge.expires_in, Some(300));

    let verification = OtpService::verify(
        &state,
        VerifyOtpRequest {
            purpose: OtpPurpose::Transfer,
            code: "123456".into(),
            reference: Some("tr_1".into()),
        },
    )
    .await
    .unwrap();
    assert!(verification.verified);

    let bad = OtpService::verify(
        &state,
        VerifyOtpRequest {
            purpose: OtpPurpose::Login,
            code: "12".into(),
            reference: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(bad, ApiError::InvalidRequest(_)));
    assert_eq!(received(&server).await.len(), 2);
}
