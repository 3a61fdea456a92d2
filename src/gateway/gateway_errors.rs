use thiserror::Error;

/// Errors surfaced by the backend gateway.
///
/// The gateway never retries and never panics across this boundary; every
/// caller decides its own fallback. An `ApiLogic` error is an HTTP 2xx whose
/// payload carried a non-success status; its display is the server message
/// verbatim so it can be shown to the cashier unchanged.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {code}: {body}")]
    Http { code: u16, body: String },

    #[error("{0}")]
    ApiLogic(String),

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            GatewayError::Decode(error.to_string())
        } else {
            GatewayError::Network(error.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(error: serde_json::Error) -> Self {
        GatewayError::Decode(error.to_string())
    }
}
