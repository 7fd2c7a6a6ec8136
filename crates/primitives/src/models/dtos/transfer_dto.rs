use crate::error::ApiError;
use crate::utility::{
    first_bool, first_id, first_money, first_str, first_u64, join_name, non_empty_str,
    normalize_currency, require_object, validate_currency_code, DEFAULT_CURRENCY,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

pub const RECIPIENT_KEY: &str = "recipient";

/// The flattened recipient name aliases, in lookup priority order.
pub const RECIPIENT_NAME_ALIASES: [&str; 3] = ["recipientName", "Recipient Name", "recipient_name"];

/// Outbound transfer request as callers build it: a loose JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransferPayload(Map<String, Value>);

impl TransferPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ApiError::Validation(format!(
                "Transfer payload must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        non_empty_str(self.0.get(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn has_structured_recipient(&self) -> bool {
        matches!(self.0.get(RECIPIENT_KEY), Some(Value::Object(_)))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn as_map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for TransferPayload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for TransferPayload {
    type Error = ApiError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// How the recipient travels on the wire, decided once from the caller's payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RecipientSpec {
    Structured(Map<String, Value>),
    FlatName(String),
}

impl RecipientSpec {
    pub fn detect(payload: &TransferPayload) -> Self {
        match payload.get(RECIPIENT_KEY) {
            Some(Value::Object(fields)) => Self::Structured(fields.clone()),
            _ => Self::FlatName(flat_display_name(payload).unwrap_or_default()),
        }
    }

    /// A structured `name` may itself be an object of name parts.
    pub fn display_name(&self) -> Option<String> {
        match self {
            Self::Structured(fields) => match fields.get("name") {
                Some(Value::Object(parts)) => non_empty_str(parts.get("full"))
                    .map(str::to_string)
                    .or_else(|| {
                        join_name(
                            non_empty_str(parts.get("first").or_else(|| parts.get("firstName"))),
                            non_empty_str(parts.get("last").or_else(|| parts.get("lastName"))),
                        )
                    }),
                other => non_empty_str(other).map(str::to_string),
            },
            Self::FlatName(name) => Some(name.trim().to_string()).filter(|n| !n.is_empty()),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }
}

/// Name from the flattened legacy fields, richest source first.
pub fn flat_display_name(payload: &TransferPayload) -> Option<String> {
    RECIPIENT_NAME_ALIASES
        .iter()
        .find_map(|key| payload.str_field(key))
        .or_else(|| payload.str_field(RECIPIENT_KEY))
        .map(str::to_string)
        .or_else(|| join_name(payload.str_field("firstName"), payload.str_field("lastName")))
        .or_else(|| payload.str_field("name").map(str::to_string))
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(try_from = "Value")]
pub struct TransferReceipt {
    pub id: Option<String>,
    pub reference: Option<String>,
    pub status: String,
    pub requires_otp: bool,
    pub message: Option<String>,
}

impl TryFrom<Value> for TransferReceipt {
    type Error = ApiError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        require_object(&raw, "transfer receipt")?;

        Ok(Self {
            id: first_id(&raw, &["id", "_id", "transferId", "transfer_id"]),
            reference: first_str(&raw, &["reference"]),
            status: first_str(&raw, &["status"]).unwrap_or_else(|| "pending".to_string()),
            requires_otp: first_bool(&raw, &["requires_otp", "requiresOtp", "otpRequired"]),
            message: first_str(&raw, &["message"]),
        })
    }
}

#[derive(Debug, Serialize, Validate)]
pub struct ConfirmTransferRequest {
    #[validate(custom(function = "crate::utility::validate_otp_code"))]
    pub otp: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(try_from = "Value")]
pub struct FeeQuote {
    pub fee: f64,
    pub total: f64,
    pub currency: String,
    pub eta_days: Option<u32>,
}

impl TryFrom<Value> for FeeQuote {
    type Error = ApiError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        require_object(&raw, "fee quote")?;

        Ok(Self {
            fee: first_money(&raw, &["fee", "fees"]),
            total: first_money(&raw, &["total", "totalAmount"]),
            currency: normalize_currency(raw.get("currency")),
            eta_days: first_u64(&raw, &["eta_days", "etaDays", "eta"])
                .and_then(|days| u32::try_from(days).ok()),
        })
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CryptoOrderRequest {
    #[validate(length(min = 2, max = 12))]
    pub asset: String,

    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,

    #[validate(custom(function = "validate_currency_code"))]
    pub currency: String,

    /// Target asset, swaps only.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 12))]
    pub to_asset: Option<String>,

    /// Destination address, sends only.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 16))]
    pub wallet_address: Option<String>,
}

impl CryptoOrderRequest {
    pub fn new(asset: &str, amount: f64) -> Self {
        Self {
            asset: asset.trim().to_uppercase(),
            amount,
            currency: default_currency(),
            to_asset: None,
            wallet_address: None,
        }
    }
}
