use crate::app_state::AppState;
use crate::client::RequestOptions;
use crate::services::{decode_or_default, path_id};
use http::Method;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::dtos::admin_dto::{
    AdjustBalanceRequest, AdjustmentReceipt, FreezeRequest, ReviewTransferRequest, UserListQuery,
};
use payrail_primitives::models::dtos::auth_dto::UserProfile;
use payrail_primitives::models::dtos::transaction_dto::list_payload;
use payrail_primitives::models::dtos::transfer_dto::TransferReceipt;
use payrail_primitives::models::entities::transaction::NormalizedTransaction;
use tracing::info;
use validator::Validate;

const USERS_PATH: &str = "/admin/users";
const TRANSFERS_PATH: &str = "/admin/transfers";

pub struct AdminService;

impl AdminService {
    pub async fn list_users(state: &AppState, query: UserListQuery) -> Result<Vec<UserProfile>, ApiError> {
        query.validate()?;

        let response = state
            .client
            .request(Method::GET, USERS_PATH, RequestOptions::new().query(&query)?)
            .await?;

        let rows = response
            .payload()
            .and_then(|p| list_payload(p, &["users"]))
            .cloned()
            .unwrap_or_default();

        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(ApiError::from))
            .collect()
    }

    pub async fn get_user(state: &AppState, user_id: &str) -> Result<UserProfile, ApiError> {
        let id = path_id(user_id)?;
        let response = state.client.get(&format!("{}/{}", USERS_PATH, id)).await?;

        match response.payload().and_then(|p| p.get("user")) {
            Some(user) => Ok(serde_json::from_value(user.clone())?),
            None => response.json(),
        }
    }

    pub async fn adjust_balance(
        state: &AppState,
        req: AdjustBalanceRequest,
    ) -> Result<AdjustmentReceipt, ApiError> {
        req.validate()?;
        let id = path_id(&req.user_id)?;

        let response = state
            .client
            .post(&format!("{}/{}/balance", USERS_PATH, id), &req)
            .await?;

        info!(
            user_id = %id,
            amount = req.amount,
            currency = %req.currency,
            "admin.adjust_balance: applied"
        );
        decode_or_default(&response)
    }

    pub async fn set_user_frozen(
        state: &AppState,
        user_id: &str,
        req: FreezeRequest,
    ) -> Result<UserProfile, ApiError> {
        req.validate()?;
        let id = path_id(user_id)?;

        let response = state
            .client
            .patch(&format!("{}/{}/status", USERS_PATH, id), &req)
            .await?;

        info!(user_id = %id, frozen = req.frozen, "admin.freeze: status changed");
        decode_or_default(&response)
    }

    pub async fn pending_transfers(state: &AppState) -> Result<Vec<NormalizedTransaction>, ApiError> {
        let response = state
            .client
            .get(&format!("{}?status=pending", TRANSFERS_PATH))
            .await?;

        Ok(response
            .payload()
            .and_then(|p| list_payload(p, &["transfers", "transactions"]))
            .map(|rows| rows.iter().map(NormalizedTransaction::from_value).collect())
            .unwrap_or_default())
    }

    pub async fn review_transfer(
        state: &AppState,
        transfer_id: &str,
        req: ReviewTransferRequest,
    ) -> Result<TransferReceipt, ApiError> {
        req.validate()?;
        let id = path_id(transfer_id)?;

        let response = state
            .client
            .post(&format!("{}/{}/review", TRANSFERS_PATH, id), &req)
            .await?;

        info!(transfer_id = %id, decision = %req.decision, "admin.review: decision recorded");
        decode_or_default(&response)
    }
}
