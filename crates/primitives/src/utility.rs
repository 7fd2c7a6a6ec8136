use crate::error::ApiError;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use validator::ValidationError;

pub const DEFAULT_CURRENCY: &str = "USD";

const MONEY_KEYS: [&str; 4] = ["value", "amount", "usd", "valueUSD"];

const MIN_LEN: usize = 8;
const MAX_LEN: usize = 128;

static CURRENCY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("Invalid currency regex"));

static OTP_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4,8}$").expect("Invalid OTP regex"));

/// Coerces loosely-typed money into a finite number; anything unreadable is `0.0`.
pub fn parse_money_to_number(value: &Value) -> f64 {
    try_parse_money(value).unwrap_or(0.0)
}

/// Like [`parse_money_to_number`], but `None` when nothing readable was found.
pub fn try_parse_money(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_money_str(s),
        Value::Object(map) => MONEY_KEYS
            .iter()
            .find_map(|key| map.get(*key).filter(|v| !v.is_null()))
            .and_then(try_parse_money),
        _ => None,
    };

    parsed.filter(|n| n.is_finite())
}

fn parse_money_str(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '$')
        .collect();

    cleaned.parse::<f64>().ok()
}

/// Money under the first non-null key of `keys`, `0.0` when absent.
pub fn first_money(raw: &Value, keys: &[&str]) -> f64 {
    keys.iter()
        .find_map(|key| raw.get(*key).filter(|v| !v.is_null()))
        .map(parse_money_to_number)
        .unwrap_or(0.0)
}

pub fn normalize_currency(value: Option<&Value>) -> String {
    currency_code(value).unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
}

/// Three-letter uppercase code, if the value holds one.
pub fn currency_code(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(|s| s.trim().to_uppercase())
        .filter(|code| CURRENCY_CODE.is_match(code))
}

/// Trimmed, non-empty string content of a JSON value.
pub fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// First non-empty string or number under `keys`, rendered as a string.
///
/// Backends echo the same id under several names (`id` and `_id`), so
/// lookups walk a priority list instead of relying on serde aliases.
pub fn first_id(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match raw.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

pub fn first_str(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| non_empty_str(raw.get(*key)))
        .map(str::to_string)
}

/// First boolean under `keys`; `false` when none is present.
pub fn first_bool(raw: &Value, keys: &[&str]) -> bool {
    keys.iter()
        .find_map(|key| raw.get(*key).and_then(Value::as_bool))
        .unwrap_or(false)
}

pub fn first_u64(raw: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|key| match raw.get(*key) {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

pub fn require_object(raw: &Value, what: &str) -> Result<(), ApiError> {
    if raw.is_object() {
        Ok(())
    } else {
        Err(ApiError::Decode(format!("Expected {} to be a JSON object", what)))
    }
}

pub fn join_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let joined = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    (!joined.is_empty()).then_some(joined)
}

/// Letters, digits and at least one symbol; the backend applies the same rule.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();

    if len < MIN_LEN {
        return Err(error("password_too_short"));
    }

    if len > MAX_LEN {
        return Err(error("password_too_long"));
    }

    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace());

    if !(has_letter && has_digit && has_symbol) {
        return Err(error("password_policy_violation"));
    }

    Ok(())
}

pub fn validate_otp_code(code: &str) -> Result<(), ValidationError> {
    if OTP_CODE.is_match(code.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("otp_format"))
    }
}

pub fn validate_currency_code(code: &str) -> Result<(), ValidationError> {
    if CURRENCY_CODE.is_match(code) {
        Ok(())
    } else {
        Err(ValidationError::new("currency_code"))
    }
}

pub fn validate_non_zero(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount != 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("amount_non_zero"))
    }
}

fn error(code: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.add_param("min_length".into(), &MIN_LEN);
    err.add_param("max_length".into(), &MAX_LEN);
    err
}
