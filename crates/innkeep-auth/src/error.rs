//! Authentication error types.

use innkeep_core::error::InnkeepError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid Credentials")]
    InvalidCredentials,

    #[error("no session token")]
    TokenMissing,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for InnkeepError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => InnkeepError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::TokenMissing | AuthError::TokenExpired | AuthError::TokenInvalid(_) => {
                InnkeepError::Unauthorized {
                    reason: err.to_string(),
                }
            }
            AuthError::Crypto(msg) => InnkeepError::Crypto(msg),
        }
    }
}
