//! Booking workflow error types.

use innkeep_core::error::InnkeepError;
use thiserror::Error;

/// Ways a quote or a confirmation can fail.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Hotel not found")]
    HotelNotFound,

    #[error("payment intent not found")]
    PaymentIntentNotFound,

    #[error("payment intent mismatch")]
    PaymentIntentMismatch,

    #[error("payment intent not succeeded. Status: {status}")]
    PaymentNotSucceeded { status: String },

    #[error(transparent)]
    Other(#[from] InnkeepError),
}

impl From<BookingError> for InnkeepError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Other(inner) => inner,
            rejected => InnkeepError::BookingRejected {
                reason: rejected.to_string(),
            },
        }
    }
}
