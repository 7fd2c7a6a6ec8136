use crate::app_state::AppState;
use crate::client::RequestOptions;
use crate::services::path_id;
use http::Method;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::dtos::transaction_dto::{
    list_payload, parse_balances, Balance, Snapshot, TransactionQuery,
};
use payrail_primitives::models::entities::transaction::NormalizedTransaction;
use serde_json::Value;
use tracing::warn;

const BALANCES_PATH: &str = "/accounts/balances";
const TRANSACTIONS_PATH: &str = "/transactions";

pub struct AccountService;

impl AccountService {
    pub async fn balances(state: &AppState) -> Result<Snapshot<Vec<Balance>>, ApiError> {
        let snapshot = Self::mirrored(state, BALANCES_PATH, RequestOptions::new()).await?;
        Ok(snapshot.map(|data| parse_balances(&data)))
    }

    pub async fn transactions(
        state: &AppState,
        query: TransactionQuery,
    ) -> Result<Snapshot<Vec<NormalizedTransaction>>, ApiError> {
        let options = RequestOptions::new().query(&query)?;
        let snapshot = Self::mirrored(state, TRANSACTIONS_PATH, options).await?;

        Ok(snapshot.map(|data| {
            list_payload(&data, &["transactions"])
                .map(|rows| rows.iter().map(NormalizedTransaction::from_value).collect())
                .unwrap_or_default()
        }))
    }

    pub async fn transaction(state: &AppState, transaction_id: &str) -> Result<NormalizedTransaction, ApiError> {
        let id = path_id(transaction_id)?;
        let response = state
            .client
            .get(&format!("{}/{}", TRANSACTIONS_PATH, id))
            .await?;

        let payload = response
            .payload()
            .ok_or_else(|| ApiError::Decode(format!("Transaction {} came back empty", id)))?;

        let row = payload.get("transaction").unwrap_or(payload);
        Ok(NormalizedTransaction::from_value(row))
    }

    /// Fresh read that refreshes the mirror; on a retryable failure falls back to it.
    async fn mirrored(
        state: &AppState,
        path: &str,
        options: RequestOptions,
    ) -> Result<Snapshot<Value>, ApiError> {
        let key = mirror_key(path, &options);

        match state.client.request(Method::GET, path, options).await {
            Ok(response) => {
                let data = response.payload().cloned().unwrap_or(Value::Null);
                if !data.is_null() {
                    state.mirror.store(&key, data.clone());
                }
                Ok(Snapshot::fresh(data))
            }
            Err(err) if err.is_retryable() => match state.mirror.load(&key) {
                Some(cached) => {
                    warn!(
                        path,
                        error = %err,
                        "account.mirror: backend unavailable; serving last known data"
                    );
                    Ok(Snapshot::stale(cached))
                }
                None => Err(err),
            },
            Err(err) => Err(err),
        }
    }
}

fn mirror_key(path: &str, options: &RequestOptions) -> String {
    let query = options
        .query
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}
