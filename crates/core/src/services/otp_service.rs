use crate::app_state::AppState;
use crate::services::decode_or_default;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::dtos::auth_dto::{
    OtpChallenge, OtpRequest, OtpVerification, VerifyOtpRequest,
};
use tracing::{info, warn};
use validator::Validate;

const SEND_PATH: &str = "/otp/send";
const VERIFY_PATH: &str = "/otp/verify";

pub struct OtpService;

impl OtpService {
    pub async fn send(state: &AppState, req: OtpRequest) -> Result<OtpChallenge, ApiError> {
        let response = state.client.post(SEND_PATH, &req).await?;

        info!(purpose = %req.purpose, "otp.send: code issued");
        decode_or_default(&response)
    }

    pub async fn verify(state: &AppState, req: VerifyOtpRequest) -> Result<OtpVerification, ApiError> {
        req.validate()?;

        let response = state.client.post(VERIFY_PATH, &req).await?;
        let verification: OtpVerification = decode_or_default(&response)?;

        if verification.verified {
            info!(purpose = %req.purpose, "otp.verify: accepted");
        } else {
            warn!(purpose = %req.purpose, "otp.verify: rejected");
        }

        Ok(verification)
    }
}
