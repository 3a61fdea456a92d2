pub mod constants;
pub mod context;
pub mod errors;
pub mod gateway;
pub mod money;
pub mod orders;
pub mod reconciliation;
pub mod sessions;

pub use context::SessionContext;
pub use errors::{Error, Result};
