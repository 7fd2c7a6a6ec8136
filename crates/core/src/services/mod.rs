pub mod account_service;
pub mod admin_service;
pub mod auth_service;
pub mod onboarding_service;
pub mod otp_service;
pub mod transfer_service;

use payrail_primitives::error::ApiError;
use payrail_primitives::models::dtos::response_dto::ApiResponse;
use serde::de::DeserializeOwned;

/// Rejects ids that would escape their path segment.
pub(crate) fn path_id(id: &str) -> Result<&str, ApiError> {
    let id = id.trim();
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid && id != "." && id != ".." {
        Ok(id)
    } else {
        Err(ApiError::Validation(format!("Invalid resource id: {:?}", id)))
    }
}

/// Decodes the payload, or the type's default when the backend sent no JSON body.
pub(crate) fn decode_or_default<T: DeserializeOwned + Default>(
    response: &ApiResponse,
) -> Result<T, ApiError> {
    match response.payload() {
        Some(_) => response.json(),
        None => Ok(T::default()),
    }
}
