use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Error, Debug)]
pub enum ReconciliationError {
    #[error("No active cashier session")]
    NoActiveSession,

    #[error("Close is only allowed once all totals have loaded")]
    NotReady,

    #[error("Counted amount is missing for '{0}'")]
    MissingCount(String),

    #[error("Counted amount for '{0}' must not be negative")]
    NegativeCount(String),

    /// The backend answered 2xx but refused the close; carries the server
    /// message verbatim so the cashier sees exactly what the server said.
    #[error("{0}")]
    CloseRejected(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
