use payrail_primitives::models::dtos::transfer_dto::TransferPayload;
use payrail_primitives::models::enum_types::{CryptoAction, DeliveryMethod, Rail};
use std::fmt;
use tracing::debug;

const DEPOSIT_FIELDS: [&str; 3] = ["type", "intent", "action"];
const RAIL_FIELDS: [&str; 3] = ["rail", "type", "intent"];
const CRYPTO_ACTION_FIELDS: [&str; 3] = ["action", "type", "intent"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEndpoint {
    Deposit,
    Rail(Rail),
    Crypto(CryptoAction),
}

impl TransferEndpoint {
    pub fn path(&self) -> String {
        match self {
            TransferEndpoint::Deposit => "/transfer/deposit".to_string(),
            TransferEndpoint::Rail(rail) => format!("/transfer/{}", rail),
            TransferEndpoint::Crypto(action) => format!("/transfer/crypto/{}", action),
        }
    }
}

impl fmt::Display for TransferEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Picks the backend route for a normalized transfer. Total: unknown input lands on `usa`.
///
/// Priority: deposit intent, named rail, crypto action, delivery method, default.
pub fn resolve_transfer_endpoint(payload: &TransferPayload) -> TransferEndpoint {
    let is_deposit = DEPOSIT_FIELDS
        .iter()
        .filter_map(|key| payload.str_field(key))
        .any(|value| value.eq_ignore_ascii_case("deposit"));

    if is_deposit {
        return TransferEndpoint::Deposit;
    }

    let rail = RAIL_FIELDS
        .iter()
        .find_map(|key| payload.str_field(key).and_then(Rail::recognize));

    match rail {
        Some(Rail::Crypto) => {
            let action = CRYPTO_ACTION_FIELDS
                .iter()
                .find_map(|key| payload.str_field(key).and_then(CryptoAction::recognize));

            if let Some(action) = action {
                return TransferEndpoint::Crypto(action);
            }
        }
        Some(rail) => return TransferEndpoint::Rail(rail),
        None => {}
    }

    if let Some(delivery) = payload.str_field("delivery").and_then(DeliveryMethod::recognize) {
        debug!(%delivery, "transfer.resolve: routed by delivery method");
        return TransferEndpoint::Rail(Rail::Usa);
    }

    debug!("transfer.resolve: no routing hints; using domestic default");
    TransferEndpoint::Rail(Rail::Usa)
}
