use crate::utility::{
    currency_code, first_id, non_empty_str, normalize_currency, parse_money_to_number,
    try_parse_money,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

/// Data plus whether it came from the offline mirror instead of the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub data: T,
    pub stale: bool,
}

impl<T> Snapshot<T> {
    pub fn fresh(data: T) -> Self {
        Self { data, stale: false }
    }

    pub fn stale(data: T) -> Self {
        Self { data, stale: true }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Snapshot<U> {
        Snapshot {
            data: f(self.data),
            stale: self.stale,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Balance {
    pub account_id: Option<String>,
    pub kind: String,
    pub currency: String,
    pub available: f64,
    pub ledger: f64,
}

/// Accepts `[..]`, `{balances|accounts: [..]}` or a `{kind: amount}` map.
pub fn parse_balances(data: &Value) -> Vec<Balance> {
    if let Some(rows) = list_payload(data, &["balances", "accounts"]) {
        return rows.iter().filter_map(balance_row).collect();
    }

    let Value::Object(map) = data else {
        return Vec::new();
    };

    let default_currency = normalize_currency(map.get("currency"));

    map.iter()
        .filter_map(|(kind, v)| {
            let amount = try_parse_money(v)?;
            Some(Balance {
                account_id: None,
                kind: kind.clone(),
                currency: currency_code(v.get("currency"))
                    .unwrap_or_else(|| default_currency.clone()),
                available: amount,
                ledger: amount,
            })
        })
        .collect()
}

fn balance_row(row: &Value) -> Option<Balance> {
    if !row.is_object() {
        return None;
    }

    let money = |keys: &[&str]| {
        keys.iter()
            .find_map(|key| row.get(*key).filter(|v| !v.is_null()))
            .map(parse_money_to_number)
    };

    let available = money(&["available", "availableBalance", "balance", "amount"]).unwrap_or(0.0);

    Some(Balance {
        account_id: first_id(row, &["accountId", "account_id", "id", "_id"]),
        kind: ["kind", "type", "name", "label"]
            .iter()
            .find_map(|key| non_empty_str(row.get(*key)))
            .unwrap_or("account")
            .to_string(),
        currency: normalize_currency(row.get("currency")),
        available,
        ledger: money(&["ledger", "ledgerBalance", "current"]).unwrap_or(available),
    })
}

/// Finds the row list in `[..]` or under the first matching envelope key.
pub fn list_payload<'a>(data: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    match data {
        Value::Array(rows) => Some(rows),
        Value::Object(map) => keys
            .iter()
            .chain(["data", "items", "results"].iter())
            .find_map(|key| map.get(*key).and_then(Value::as_array)),
        _ => None,
    }
}
