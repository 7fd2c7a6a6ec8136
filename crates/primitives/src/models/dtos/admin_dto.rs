use crate::error::ApiError;
use crate::models::enum_types::ReviewDecision;
use crate::utility::{
    currency_code, first_id, first_money, require_object, validate_currency_code,
    validate_non_zero,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 200))]
    pub per_page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Credit (positive) or debit (negative) applied by an operator.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdjustBalanceRequest {
    #[serde(skip)]
    #[validate(length(min = 1))]
    pub user_id: String,

    #[validate(custom(function = "validate_non_zero"))]
    pub amount: f64,

    #[validate(custom(function = "validate_currency_code"))]
    pub currency: String,

    #[validate(length(min = 3, max = 280))]
    pub reason: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Value")]
pub struct AdjustmentReceipt {
    pub id: Option<String>,
    pub balance: f64,
    pub currency: Option<String>,
}

impl TryFrom<Value> for AdjustmentReceipt {
    type Error = ApiError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        require_object(&raw, "balance adjustment")?;

        Ok(Self {
            id: first_id(&raw, &["id", "_id", "adjustmentId"]),
            balance: first_money(&raw, &["balance", "newBalance"]),
            currency: currency_code(raw.get("currency")),
        })
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct FreezeRequest {
    pub frozen: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 280))]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct ReviewTransferRequest {
    pub decision: ReviewDecision,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 280))]
    pub note: Option<String>,
}
