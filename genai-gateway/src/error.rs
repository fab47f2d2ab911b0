use crate::services::providers::ProviderError;
use service_core::error::AppError;
use thiserror::Error;

/// Failures of a single translation.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The endpoint needs an upload and the request carried none.
    #[error("Missing attachment: expected a file in the '{0}' field")]
    MissingAttachment(&'static str),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::MissingAttachment(_) | GatewayError::MalformedRequest(_) => {
                AppError::BadRequest(anyhow::Error::new(err))
            }
            GatewayError::PayloadTooLarge(msg) => AppError::PayloadTooLarge(msg),
            GatewayError::Provider(e) => AppError::InternalError(anyhow::Error::new(e)),
        }
    }
}
