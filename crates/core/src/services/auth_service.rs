use crate::app_state::AppState;
use crate::client::RequestOptions;
use crate::services::decode_or_default;
use http::Method;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::dtos::auth_dto::{
    LoginRequest, LoginResponse, RegisterRequest, UserProfile,
};
use serde_json::json;
use tracing::{info, warn};
use validator::Validate;

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";
const LOGOUT_PATH: &str = "/auth/logout";
const REFRESH_PATH: &str = "/auth/refresh";
const ME_PATH: &str = "/auth/me";

pub struct AuthService;

impl AuthService {
    pub async fn login(state: &AppState, req: LoginRequest) -> Result<LoginResponse, ApiError> {
        let req = req.normalize();
        req.validate()?;

        // Credentials are not a write; replaying them is harmless.
        let response = state
            .client
            .request(
                Method::POST,
                LOGIN_PATH,
                RequestOptions::new().json(&req)?.without_idempotency_key(),
            )
            .await?;

        let login: LoginResponse = decode_or_default(&response)?;
        Self::store_token(state, &login);

        info!(requires_otp = login.requires_otp, "auth.login: success");
        Ok(login)
    }

    pub async fn register(state: &AppState, req: RegisterRequest) -> Result<LoginResponse, ApiError> {
        let req = req.normalize();
        req.validate()?;

        let response = state.client.post(REGISTER_PATH, &req).await?;

        let registered: LoginResponse = decode_or_default(&response)?;
        Self::store_token(state, &registered);

        info!("auth.register: account created");
        Ok(registered)
    }

    /// Always ends the local session, even when the backend call fails.
    pub async fn logout(state: &AppState) -> Result<(), ApiError> {
        if let Err(e) = state.client.post(LOGOUT_PATH, json!({})).await {
            warn!(error = %e, "auth.logout: backend logout failed; clearing local session anyway");
        }

        state.end_session();
        info!("auth.logout: session ended");
        Ok(())
    }

    pub async fn refresh(state: &AppState, refresh_token: &str) -> Result<LoginResponse, ApiError> {
        let response = state
            .client
            .request(
                Method::POST,
                REFRESH_PATH,
                RequestOptions::new()
                    .body(json!({ "refreshToken": refresh_token }))
                    .without_idempotency_key(),
            )
            .await?;

        let refreshed: LoginResponse = response.json()?;

        if refreshed.token.is_none() {
            return Err(ApiError::Decode("Refresh response carried no token".into()));
        }

        Self::store_token(state, &refreshed);
        Ok(refreshed)
    }

    pub async fn me(state: &AppState) -> Result<UserProfile, ApiError> {
        let response = state.client.get(ME_PATH).await?;

        match response.payload().and_then(|p| p.get("user")) {
            Some(user) => Ok(serde_json::from_value(user.clone())?),
            None => response.json(),
        }
    }

    fn store_token(state: &AppState, login: &LoginResponse) {
        if let Some(token) = login.token.as_deref() {
            state.session.sign_in(token);
        }
    }
}
