use crate::app_state::AppState;
use crate::services::decode_or_default;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::dtos::onboarding_dto::{OnboardingStatus, StepSubmission};
use serde_json::json;
use tracing::info;

const STATUS_PATH: &str = "/onboarding/status";
const STEPS_PATH: &str = "/onboarding/steps";
const COMPLETE_PATH: &str = "/onboarding/complete";

pub struct OnboardingService;

impl OnboardingService {
    pub async fn status(state: &AppState) -> Result<OnboardingStatus, ApiError> {
        let response = state.client.get(STATUS_PATH).await?;
        decode_or_default(&response)
    }

    pub async fn submit_step(state: &AppState, submission: StepSubmission) -> Result<OnboardingStatus, ApiError> {
        if !submission.data.is_object() {
            return Err(ApiError::Validation(format!(
                "Onboarding step {} needs an object of fields",
                submission.step
            )));
        }

        let response = state.client.post(STEPS_PATH, &submission).await?;

        info!(step = %submission.step, "onboarding.step: submitted");
        decode_or_default(&response)
    }

    pub async fn complete(state: &AppState) -> Result<OnboardingStatus, ApiError> {
        let response = state.client.post(COMPLETE_PATH, json!({})).await?;

        info!("onboarding.complete: submitted for review");
        decode_or_default(&response)
    }
}
