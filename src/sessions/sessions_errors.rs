use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Error, Debug)]
pub enum SessionError {
    /// The backend returned 2xx but declined to open the session. The
    /// message is shown to the cashier verbatim.
    #[error("{0}")]
    OpenRejected(String),

    #[error(transparent)]
    Gateway(GatewayError),
}

impl From<GatewayError> for SessionError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::ApiLogic(message) => SessionError::OpenRejected(message),
            other => SessionError::Gateway(other),
        }
    }
}
