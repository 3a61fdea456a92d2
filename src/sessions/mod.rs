pub mod sessions_errors;
pub mod sessions_model;
pub mod sessions_service;

pub use sessions_errors::SessionError;
pub use sessions_model::TillCount;
pub use sessions_service::OpenSessionService;
