use crate::error::ApiError;
use crate::models::enum_types::OtpPurpose;
use crate::utility::{
    first_bool, first_id, first_str, first_u64, require_object, validate_otp_code,
    validate_password,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

#[derive(Debug, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
        .normalize()
    }

    pub fn normalize(mut self) -> Self {
        self.email = self.email.trim().to_lowercase();
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Value")]
pub struct LoginResponse {
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserProfile>,
    pub requires_otp: bool,
}

impl TryFrom<Value> for LoginResponse {
    type Error = ApiError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        require_object(&raw, "login response")?;

        Ok(Self {
            token: first_str(&raw, &["token", "accessToken", "access_token"]),
            refresh_token: first_str(&raw, &["refresh_token", "refreshToken"]),
            user: raw
                .get("user")
                .filter(|u| u.is_object())
                .map(UserProfile::from_object),
            requires_otp: first_bool(&raw, &["requires_otp", "requiresOtp", "otpRequired"]),
        })
    }
}

#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,

    #[validate(custom(function = "validate_password"))]
    pub password: String,

    #[validate(length(min = 1, max = 80))]
    pub first_name: String,

    #[validate(length(min = 1, max = 80))]
    pub last_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 7, max = 20))]
    pub phone: Option<String>,
}

impl RegisterRequest {
    pub fn normalize(mut self) -> Self {
        self.email = self.email.trim().to_lowercase();
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();

        if self
            .phone
            .as_ref()
            .map(|p| p.trim().is_empty())
            .unwrap_or(false)
        {
            self.phone = None;
        }

        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "Value")]
pub struct UserProfile {
    pub id: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub is_frozen: bool,
}

impl TryFrom<Value> for UserProfile {
    type Error = ApiError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        require_object(&raw, "user profile")?;
        Ok(Self::from_object(&raw))
    }
}

impl UserProfile {
    /// Reads the snake_case, camelCase and Mongo-style keys the backends send.
    pub fn from_object(raw: &Value) -> Self {
        Self {
            id: first_id(raw, &["id", "_id", "userId"]),
            email: first_str(raw, &["email"]),
            first_name: first_str(raw, &["first_name", "firstName"]),
            last_name: first_str(raw, &["last_name", "lastName"]),
            role: first_str(raw, &["role"]),
            is_frozen: first_bool(raw, &["is_frozen", "isFrozen", "frozen"]),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role
            .as_deref()
            .map(|r| r.eq_ignore_ascii_case("admin"))
            .unwrap_or(false)
    }
}

#[derive(Debug, Serialize)]
pub struct OtpRequest {
    pub purpose: OtpPurpose,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Debug, Serialize, Validate)]
pub struct VerifyOtpRequest {
    pub purpose: OtpPurpose,

    #[validate(custom(function = "validate_otp_code"))]
    pub code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Value")]
pub struct OtpChallenge {
    pub channel: Option<String>,
    pub expires_in: Option<u64>,
    pub reference: Option<String>,
}

impl TryFrom<Value> for OtpChallenge {
    type Error = ApiError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        require_object(&raw, "OTP challenge")?;

        Ok(Self {
            channel: first_str(&raw, &["channel"]),
            expires_in: first_u64(&raw, &["expires_in", "expiresIn", "ttl"]),
            reference: first_str(&raw, &["reference"]),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Value")]
pub struct OtpVerification {
    pub verified: bool,
    pub token: Option<String>,
    pub details: Option<Value>,
}

impl TryFrom<Value> for OtpVerification {
    type Error = ApiError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        require_object(&raw, "OTP verification")?;

        Ok(Self {
            verified: first_bool(&raw, &["verified", "valid", "success"]),
            token: first_str(&raw, &["token", "verificationToken"]),
            details: raw.get("details").filter(|d| !d.is_null()).cloned(),
        })
    }
}
