pub mod admin_dto;
pub mod auth_dto;
pub mod onboarding_dto;
pub mod response_dto;
pub mod transaction_dto;
pub mod transfer_dto;

pub use admin_dto::*;
pub use auth_dto::*;
pub use onboarding_dto::*;
pub use response_dto::*;
pub use transaction_dto::*;
pub use transfer_dto::*;
