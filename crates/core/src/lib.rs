pub mod abort;
pub mod app_state;
pub mod client;
pub mod mirror;
pub mod services;
pub mod session;

pub use abort::{AbortController, AbortReason, AbortSignal};
pub use app_state::AppState;
pub use client::{ApiClient, IdempotencyKey, RequestOptions};
pub use mirror::OfflineMirror;
pub use session::{Session, SessionScope};
