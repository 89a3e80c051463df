//! Payment intent model, as reported by the payment processor.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata key tagging an intent with the hotel being booked.
pub const HOTEL_ID_KEY: &str = "hotelId";
/// Metadata key tagging an intent with the booking user.
pub const USER_ID_KEY: &str = "userId";

/// Status string the processor reports once a charge has gone through.
pub const STATUS_SUCCEEDED: &str = "succeeded";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    /// Secret the browser uses to confirm the charge.
    pub client_secret: Option<String>,
    pub status: String,
    /// Amount in the currency's minor unit (pence, cents).
    pub amount: i64,
    pub currency: String,
    pub metadata: HashMap<String, String>,
}

impl PaymentIntent {
    pub fn hotel_id(&self) -> Option<&str> {
        self.metadata.get(HOTEL_ID_KEY).map(String::as_str)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.metadata.get(USER_ID_KEY).map(String::as_str)
    }

    pub fn is_succeeded(&self) -> bool {
        self.status == STATUS_SUCCEEDED
    }

    /// The amount in major units.
    pub fn major_amount(&self) -> f64 {
        self.amount as f64 / 100.0
    }
}

#[derive(Debug, Clone)]
pub struct CreatePaymentIntent {
    /// Amount in the currency's minor unit.
    pub amount: i64,
    pub hotel_id: Uuid,
    pub user_id: Uuid,
}

impl CreatePaymentIntent {
    pub fn metadata(&self) -> HashMap<String, String> {
        HashMap::from([
            (HOTEL_ID_KEY.to_string(), self.hotel_id.to_string()),
            (USER_ID_KEY.to_string(), self.user_id.to_string()),
        ])
    }
}

/// Convert a major-unit amount to minor units, rounding to the nearest
/// unit.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}
