use crate::models::enum_types::Direction;
use crate::utility::{first_id, join_name, non_empty_str, normalize_currency, parse_money_to_number};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const UNKNOWN_COUNTERPARTY: &str = "Unknown";

// Seconds below this are treated as unix seconds, above as millis.
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// A backend ledger row reconciled into one shape for dashboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTransaction {
    pub id: Option<String>,
    /// Always non-negative; the sign lives in `direction`.
    pub amount: f64,
    pub direction: Direction,
    pub currency: String,
    pub status: String,
    pub counterparty: String,
    pub description: Option<String>,
    pub rail: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl NormalizedTransaction {
    pub fn from_value(raw: &Value) -> Self {
        let amount = ["amount", "value", "total"]
            .iter()
            .find_map(|key| raw.get(*key).filter(|v| !v.is_null()))
            .map(parse_money_to_number)
            .unwrap_or(0.0);

        let direction = ["direction", "type", "kind"]
            .iter()
            .find_map(|key| non_empty_str(raw.get(*key)).and_then(Direction::recognize))
            .unwrap_or(if amount < 0.0 {
                Direction::Debit
            } else {
                Direction::Credit
            });

        let status = non_empty_str(raw.get("status"))
            .map(str::to_lowercase)
            .unwrap_or_else(|| "pending".to_string());

        Self {
            id: first_id(raw, &["id", "_id", "reference", "txId"]),
            amount: amount.abs(),
            direction,
            currency: normalize_currency(raw.get("currency")),
            status,
            counterparty: resolve_counterparty(raw, direction),
            description: non_empty_str(raw.get("description")).map(str::to_string),
            rail: non_empty_str(raw.get("rail")).map(str::to_string),
            created_at: ["createdAt", "created_at", "date", "timestamp"]
                .iter()
                .find_map(|key| raw.get(*key).and_then(parse_timestamp)),
        }
    }

    pub fn signed_amount(&self) -> f64 {
        match self.direction {
            Direction::Credit => self.amount,
            Direction::Debit => -self.amount,
        }
    }
}

pub fn normalize_transaction(raw: &Value) -> NormalizedTransaction {
    NormalizedTransaction::from_value(raw)
}

fn party_name(raw: &Value, flat_key: &str, nested_key: &str) -> Option<String> {
    if let Some(name) = non_empty_str(raw.get(flat_key)) {
        return Some(name.to_string());
    }

    let nested = raw.get(nested_key)?;
    if let Some(name) = non_empty_str(Some(nested)) {
        return Some(name.to_string());
    }

    non_empty_str(nested.get("name"))
        .map(str::to_string)
        .or_else(|| {
            join_name(
                non_empty_str(nested.get("firstName")),
                non_empty_str(nested.get("lastName")),
            )
        })
}

/// The other side of the movement: who was paid for debits, who paid for credits.
pub fn resolve_counterparty(raw: &Value, direction: Direction) -> String {
    if let Some(name) = non_empty_str(raw.get("counterparty")) {
        return name.to_string();
    }

    let directed = match direction {
        Direction::Debit => party_name(raw, "recipientName", "recipient"),
        Direction::Credit => party_name(raw, "senderName", "sender"),
    };

    directed
        .or_else(|| party_name(raw, "merchantName", "merchant"))
        .or_else(|| non_empty_str(raw.get("description")).map(str::to_string))
        .or_else(|| non_empty_str(raw.get("rail")).map(|r| r.to_uppercase()))
        .unwrap_or_else(|| UNKNOWN_COUNTERPARTY.to_string())
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => {
            let raw = n.as_i64()?;
            if raw.abs() >= MILLIS_THRESHOLD {
                Utc.timestamp_millis_opt(raw).single()
            } else {
                Utc.timestamp_opt(raw, 0).single()
            }
        }
        _ => None,
    }
}
