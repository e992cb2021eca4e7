use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{code} (HTTP {status}): {message}")]
    Server {
        status: u16,
        code: String,
        message: String,
        request_id: Option<String>,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Endpoint error: {0}")]
    Endpoint(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Key setup failure. HMAC accepts keys of any length, so the signer
    /// never produces this today.
    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

impl RpcError {
    /// Server error code, e.g. `InvalidCenId.NotFound`.
    pub fn code(&self) -> Option<&str> {
        match self {
            RpcError::Server { code, .. } => Some(code),
            _ => None,
        }
    }
}
