use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Amount paid does not cover the rounded total")]
    InsufficientPayment,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
