//! Gateway error types.

use innkeep_core::error::InnkeepError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned {status}: {message}")]
    Api {
        service: &'static str,
        status: u16,
        message: String,
    },

    #[error("invalid {service} identifier {id:?}")]
    InvalidId { service: &'static str, id: String },

    #[error("unexpected {service} response: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },
}

impl From<GatewayError> for InnkeepError {
    fn from(err: GatewayError) -> Self {
        InnkeepError::Upstream(err.to_string())
    }
}
