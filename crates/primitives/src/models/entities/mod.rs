pub mod enum_types;
pub mod transaction;

pub use enum_types::*;
pub use transaction::*;
