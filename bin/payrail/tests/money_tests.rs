use payrail_primitives::models::entities::transaction::{
    normalize_transaction, resolve_counterparty, NormalizedTransaction,
};
use payrail_primitives::models::enum_types::{DeliveryMethod, Direction, Rail};
use payrail_primitives::utility::{
    normalize_currency, parse_money_to_number, validate_otp_code, validate_password,
};
use serde_json::json;

#[test]
fn test_parse_money_accepts_loose_shapes() {
    assert_eq!(parse_money_to_number(&json!(12.5)), 12.5);
    assert_eq!(parse_money_to_number(&json!("$1,234.56")), 1234.56);
    assert_eq!(parse_money_to_number(&json!(" 7 ")), 7.0);
    assert_eq!(parse_money_to_number(&json!({ "value": "3.10" })), 3.1);
    assert_eq!(parse_money_to_number(&json!({ "usd": 9 })), 9.0);
    assert_eq!(parse_money_to_number(&json!({ "value": null, "amount": 4 })), 4.0);
}

#[test]
fn test_parse_money_falls_back_to_zero() {
    for junk in [json!(null), json!(true), json!("abc"), json!([1]), json!({}), json!("1e999")] {
        assert_eq!(parse_money_to_number(&junk), 0.0, "for {}", junk);
    }
}

#[test]
fn test_currency_normalization() {
    assert_eq!(normalize_currency(Some(&json!(" eur "))), "EUR");
    assert_eq!(normalize_currency(Some(&json!("dollars"))), "USD");
    assert_eq!(normalize_currency(Some(&json!(840))), "USD");
    assert_eq!(normalize_currency(None), "USD");
}

#[test]
fn test_enum_recognition_is_forgiving() {
    assert_eq!(DeliveryMethod::recognize("Same Day ACH"), Some(DeliveryMethod::SameDayAch));
    assert_eq!(DeliveryMethod::SameDayAch.to_string(), "SAME_DAY_ACH");
    assert_eq!(Rail::recognize("CashApp"), Some(Rail::Cashapp));
    assert_eq!(Rail::recognize("WeChat Pay"), Some(Rail::Wechat));
    assert_eq!(Rail::recognize("   "), None);
    assert_eq!(Direction::recognize("Outgoing"), Some(Direction::Debit));
}

#[test]
fn test_direction_from_sign_when_untyped() {
    let debit = NormalizedTransaction::from_value(&json!({ "amount": -5 }));
    assert_eq!(debit.direction, Direction::Debit);
    assert_eq!(debit.amount, 5.0);

    let credit = NormalizedTransaction::from_value(&json!({ "amount": "5" }));
    assert_eq!(credit.direction, Direction::Credit);
    assert_eq!(credit.currency, "USD");
    assert_eq!(credit.counterparty, "Unknown");
}

#[test]
fn test_counterparty_fallbacks() {
    let raw = json!({ "recipient": "Jane Roe", "sender": { "name": "Acme" } });
    assert_eq!(resolve_counterparty(&raw, Direction::Debit), "Jane Roe");
    assert_eq!(resolve_counterparty(&raw, Direction::Credit), "Acme");

    let by_rail = json!({ "rail": "zelle" });
    assert_eq!(resolve_counterparty(&by_rail, Direction::Debit), "ZELLE");

    let explicit = json!({ "counterparty": "Landlord", "recipientName": "Ignored" });
    assert_eq!(resolve_counterparty(&explicit, Direction::Debit), "Landlord");
}

#[test]
fn test_millisecond_timestamps() {
    let tx = normalize_transaction(&json!({ "amount": 1, "createdAt": 1714557600000i64 }));
    assert_eq!(tx.created_at.map(|t| t.timestamp()), Some(1714557600));
}

#[test]
fn test_credential_validators() {
    assert!(validate_password("Str0ng#Pass").is_ok());
    assert!(validate_password("weak").is_err());
    assert!(validate_otp_code(" 123456 ").is_ok());
    assert!(validate_otp_code("12a456").is_err());
}
