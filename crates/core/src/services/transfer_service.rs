pub mod endpoint;
pub mod normalize;

pub use endpoint::{resolve_transfer_endpoint, TransferEndpoint};
pub use normalize::normalize_transfer_payload;

use crate::app_state::AppState;
use crate::client::RequestOptions;
use crate::services::{decode_or_default, path_id};
use http::Method;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::dtos::transfer_dto::{
    ConfirmTransferRequest, CryptoOrderRequest, FeeQuote, RecipientSpec, TransferPayload,
    TransferReceipt, RECIPIENT_KEY,
};
use payrail_primitives::models::enum_types::CryptoAction;
use serde_json::json;
use tracing::{info, warn};
use validator::Validate;

const TRANSFERS_PATH: &str = "/transfers";
const FEE_QUOTE_PATH: &str = "/transfers/fees/quote";

pub struct TransferService;

impl TransferService {
    /// Normalizes, checks and routes a transfer without touching the network.
    pub fn prepare(payload: TransferPayload) -> Result<(TransferEndpoint, TransferPayload), ApiError> {
        let caller_sent_recipient = payload.has_structured_recipient();
        let mut normalized = normalize_transfer_payload(payload);

        if RecipientSpec::detect(&normalized).display_name().is_none() {
            return Err(ApiError::Validation("Recipient name required".into()));
        }

        // The backend trims `recipient`; it must only ever be the caller's object.
        if normalized.has_structured_recipient() && !caller_sent_recipient {
            warn!("transfer.prepare: dropping recipient object the caller never supplied");
            normalized.as_map_mut().remove(RECIPIENT_KEY);
        }

        let endpoint = resolve_transfer_endpoint(&normalized);
        Ok((endpoint, normalized))
    }

    pub async fn initiate(state: &AppState, payload: TransferPayload) -> Result<TransferReceipt, ApiError> {
        Self::initiate_with(state, payload, RequestOptions::new()).await
    }

    pub async fn initiate_with(
        state: &AppState,
        payload: TransferPayload,
        options: RequestOptions,
    ) -> Result<TransferReceipt, ApiError> {
        let (endpoint, body) = Self::prepare(payload)?;

        info!(endpoint = %endpoint, "transfer.initiate: submitting");

        let response = state
            .client
            .request(Method::POST, &endpoint.path(), options.body(body.into_value()))
            .await?;

        decode_or_default(&response)
    }

    pub async fn get(state: &AppState, transfer_id: &str) -> Result<TransferReceipt, ApiError> {
        let id = path_id(transfer_id)?;
        let response = state.client.get(&format!("{}/{}", TRANSFERS_PATH, id)).await?;
        response.json()
    }

    pub async fn confirm(
        state: &AppState,
        transfer_id: &str,
        req: ConfirmTransferRequest,
    ) -> Result<TransferReceipt, ApiError> {
        req.validate()?;
        let id = path_id(transfer_id)?;

        let response = state
            .client
            .post(&format!("{}/{}/confirm", TRANSFERS_PATH, id), &req)
            .await?;

        info!(transfer_id = %id, "transfer.confirm: otp accepted");
        decode_or_default(&response)
    }

    pub async fn cancel(state: &AppState, transfer_id: &str) -> Result<TransferReceipt, ApiError> {
        let id = path_id(transfer_id)?;

        let response = state
            .client
            .post(&format!("{}/{}/cancel", TRANSFERS_PATH, id), json!({}))
            .await?;

        decode_or_default(&response)
    }

    /// Fee preview for a draft transfer; a read, so no idempotency key is sent.
    pub async fn quote_fees(state: &AppState, payload: TransferPayload) -> Result<FeeQuote, ApiError> {
        let body = normalize_transfer_payload(payload);

        let response = state
            .client
            .request(
                Method::POST,
                FEE_QUOTE_PATH,
                RequestOptions::new()
                    .body(body.into_value())
                    .without_idempotency_key(),
            )
            .await?;

        response.json()
    }

    pub async fn crypto_buy(state: &AppState, req: CryptoOrderRequest) -> Result<TransferReceipt, ApiError> {
        Self::crypto_order(state, CryptoAction::Buy, req).await
    }

    pub async fn crypto_swap(state: &AppState, req: CryptoOrderRequest) -> Result<TransferReceipt, ApiError> {
        if req.to_asset.is_none() {
            return Err(ApiError::Validation("Target asset required for swap".into()));
        }
        Self::crypto_order(state, CryptoAction::Swap, req).await
    }

    pub async fn crypto_send(state: &AppState, req: CryptoOrderRequest) -> Result<TransferReceipt, ApiError> {
        if req.wallet_address.is_none() {
            return Err(ApiError::Validation("Wallet address required for send".into()));
        }
        Self::crypto_order(state, CryptoAction::Send, req).await
    }

    async fn crypto_order(
        state: &AppState,
        action: CryptoAction,
        req: CryptoOrderRequest,
    ) -> Result<TransferReceipt, ApiError> {
        req.validate()?;

        let endpoint = TransferEndpoint::Crypto(action);
        info!(endpoint = %endpoint, asset = %req.asset, "transfer.crypto: submitting");

        let response = state.client.post(&endpoint.path(), &req).await?;
        decode_or_default(&response)
    }
}
