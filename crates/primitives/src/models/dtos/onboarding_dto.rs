use crate::error::ApiError;
use crate::models::enum_types::OnboardingStep;
use crate::utility::{first_bool, require_object};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct StepSubmission {
    pub step: OnboardingStep,
    pub data: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct OnboardingStatus {
    pub current_step: Option<OnboardingStep>,
    pub completed_steps: Vec<OnboardingStep>,
    pub completed: bool,
}

impl TryFrom<Value> for OnboardingStatus {
    type Error = ApiError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        require_object(&raw, "onboarding status")?;

        let step = |value: &Value| serde_json::from_value::<OnboardingStep>(value.clone()).ok();

        Ok(Self {
            current_step: ["current_step", "currentStep"]
                .iter()
                .find_map(|key| raw.get(*key).and_then(step)),
            completed_steps: ["completed_steps", "completedSteps"]
                .iter()
                .find_map(|key| raw.get(*key).and_then(Value::as_array))
                .map(|steps| steps.iter().filter_map(step).collect())
                .unwrap_or_default(),
            completed: first_bool(&raw, &["completed", "isComplete", "complete"]),
        })
    }
}

impl OnboardingStatus {
    pub fn has_completed(&self, step: OnboardingStep) -> bool {
        self.completed || self.completed_steps.contains(&step)
    }
}
