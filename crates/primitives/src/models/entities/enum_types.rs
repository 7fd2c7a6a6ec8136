use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumString};

fn compact(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryMethod {
    Wire,
    Ach,
    SameDayAch,
}

impl DeliveryMethod {
    /// Case, spacing and punctuation are ignored: `same-day ach` is `SAME_DAY_ACH`.
    pub fn recognize(input: &str) -> Option<Self> {
        match compact(input).as_str() {
            "wire" | "wiretransfer" | "domesticwire" => Some(Self::Wire),
            "ach" | "standardach" | "achtransfer" => Some(Self::Ach),
            "samedayach" | "achsameday" | "sameday" => Some(Self::SameDayAch),
            _ => None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Rail {
    Zelle,
    Usa,
    Paypal,
    Revolut,
    Cashapp,
    Alipay,
    Billpay,
    International,
    Venmo,
    Wise,
    Wechat,
    Crypto,
}

impl Rail {
    pub fn recognize(input: &str) -> Option<Self> {
        let key = compact(input);
        match key.as_str() {
            "weixin" | "wechatpay" => Some(Self::Wechat),
            "" => None,
            other => Self::from_str(other).ok(),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CryptoAction {
    Buy,
    Swap,
    Send,
}

impl CryptoAction {
    pub fn recognize(input: &str) -> Option<Self> {
        Self::from_str(&compact(input)).ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    Login,
    Transfer,
    Withdrawal,
    ProfileUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    PersonalInfo,
    Address,
    Identity,
    Documents,
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Credit,
    Debit,
}

impl Direction {
    pub fn recognize(input: &str) -> Option<Self> {
        match compact(input).as_str() {
            "credit" | "deposit" | "incoming" | "inbound" | "received" | "receive" | "refund" => {
                Some(Self::Credit)
            }
            "debit" | "withdrawal" | "withdraw" | "outgoing" | "outbound" | "sent" | "send"
            | "payment" | "transfer" => Some(Self::Debit),
            _ => None,
        }
    }
}
