use thiserror::Error;

use crate::gateway::GatewayError;
use crate::orders::OrderError;
use crate::reconciliation::ReconciliationError;
use crate::sessions::SessionError;

/// Crate-wide error type aggregating the per-module errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Reconciliation error: {0}")]
    Reconciliation(#[from] ReconciliationError),

    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

pub type Result<T> = std::result::Result<T, Error>;
