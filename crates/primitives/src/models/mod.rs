pub mod config;
pub mod dtos;
pub mod entities;

// Re-export commonly used types
pub use config::*;
pub use dtos::*;
pub use entities::*;
