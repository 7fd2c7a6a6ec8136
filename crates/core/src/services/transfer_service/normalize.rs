use payrail_primitives::models::dtos::transfer_dto::{
    flat_display_name, RecipientSpec, TransferPayload, RECIPIENT_KEY, RECIPIENT_NAME_ALIASES,
};
use payrail_primitives::models::enum_types::{DeliveryMethod, Rail};
use payrail_primitives::utility::{join_name, non_empty_str, normalize_currency, parse_money_to_number};
use serde_json::{Map, Number, Value};

/// Structured recipient field, then the legacy places it used to live.
/// `bank.x` reads `x` from the payload's `bank` sub-object.
const RECIPIENT_BACKFILL: &[(&str, &[&str])] = &[
    ("bankName", &["bankName", "bank_name", "bank.name", "bank.bankName"]),
    (
        "accountNumber",
        &["accountNumber", "account_number", "bank.accountNumber", "bank.account_number"],
    ),
    (
        "routingNumber",
        &["routingNumber", "routing_number", "bank.routingNumber", "bank.routing_number"],
    ),
    ("accountType", &["accountType", "account_type", "bank.accountType"]),
    (
        "swift",
        &["swift", "swiftCode", "swift_code", "bic", "bank.swift", "bank.swiftCode"],
    ),
    ("iban", &["iban", "bank.iban"]),
    ("address", &["address", "recipientAddress", "recipient_address"]),
    ("city", &["city"]),
    ("state", &["state"]),
    ("postalCode", &["postalCode", "postal_code", "zip", "zipCode"]),
    ("country", &["country", "recipientCountry"]),
    ("email", &["recipientEmail", "recipient_email"]),
    ("phone", &["recipientPhone", "recipient_phone"]),
];

const RECIPIENT_OWN_NAME_KEYS: [&str; 5] = ["name", "fullName", "full_name", "accountName", "account_name"];

/// Reconciles the historical transfer payload shapes into the one the backend reads.
///
/// Never invents a `recipient` object and never overwrites a value the caller
/// supplied. Running it on its own output is a no-op.
pub fn normalize_transfer_payload(payload: TransferPayload) -> TransferPayload {
    let recipient = RecipientSpec::detect(&payload);
    let mut out = payload;

    let amount = out
        .get("amount")
        .map(parse_money_to_number)
        .unwrap_or(0.0);
    let currency = normalize_currency(out.get("currency"));

    let fields = out.as_map_mut();
    fields.insert("amount".into(), money_value(amount));
    fields.insert("currency".into(), Value::String(currency));

    normalize_delivery(&mut out);

    match recipient {
        RecipientSpec::Structured(fields) => {
            let filled = backfill_recipient(fields, &out);
            let map = out.as_map_mut();
            for alias in RECIPIENT_NAME_ALIASES {
                map.remove(alias);
            }
            map.insert(RECIPIENT_KEY.into(), Value::Object(filled));
        }
        RecipientSpec::FlatName(name) => apply_flat_name(&mut out, name.trim()),
    }

    out
}

fn money_value(amount: f64) -> Value {
    Number::from_f64(amount)
        .map(Value::Number)
        .unwrap_or_else(|| Value::from(0))
}

fn normalize_delivery(payload: &mut TransferPayload) {
    let delivery = payload.str_field("delivery").and_then(DeliveryMethod::recognize);

    let Some(delivery) = delivery else {
        return;
    };

    let map = payload.as_map_mut();
    map.insert("delivery".into(), Value::String(delivery.to_string()));

    if delivery == DeliveryMethod::Wire && non_empty_str(map.get("rail")).is_none() {
        map.insert("rail".into(), Value::String(Rail::Usa.to_string()));
    }
}

fn apply_flat_name(payload: &mut TransferPayload, name: &str) {
    let map = payload.as_map_mut();
    map.remove(RECIPIENT_KEY);

    for alias in RECIPIENT_NAME_ALIASES {
        if name.is_empty() {
            map.remove(alias);
        } else {
            map.insert(alias.into(), Value::String(name.to_string()));
        }
    }
}

fn backfill_recipient(mut recipient: Map<String, Value>, payload: &TransferPayload) -> Map<String, Value> {
    if is_blank(recipient.get("name")) {
        if let Some(name) = structured_display_name(&recipient, payload) {
            recipient.insert("name".into(), Value::String(name));
        }
    }

    for (field, sources) in RECIPIENT_BACKFILL {
        if !is_blank(recipient.get(*field)) {
            continue;
        }

        let found = sources
            .iter()
            .map(|source| lookup(payload, source))
            .find(|value| !is_blank(*value))
            .flatten();

        if let Some(value) = found {
            recipient.insert((*field).to_string(), value.clone());
        }
    }

    recipient
}

fn structured_display_name(recipient: &Map<String, Value>, payload: &TransferPayload) -> Option<String> {
    RECIPIENT_OWN_NAME_KEYS
        .iter()
        .find_map(|key| non_empty_str(recipient.get(*key)))
        .map(str::to_string)
        .or_else(|| {
            join_name(
                non_empty_str(recipient.get("firstName")),
                non_empty_str(recipient.get("lastName")),
            )
        })
        .or_else(|| {
            join_name(
                non_empty_str(recipient.get("first_name")),
                non_empty_str(recipient.get("last_name")),
            )
        })
        .or_else(|| flat_display_name(payload))
        .or_else(|| {
            ["bank.accountName", "bank.account_name", "accountName"]
                .iter()
                .find_map(|source| non_empty_str(lookup(payload, source)))
                .map(str::to_string)
        })
}

fn lookup<'a>(payload: &'a TransferPayload, source: &str) -> Option<&'a Value> {
    match source.split_once('.') {
        Some((parent, child)) => payload.get(parent).and_then(|p| p.get(child)),
        None => payload.get(source),
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}
