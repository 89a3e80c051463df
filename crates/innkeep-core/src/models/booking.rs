//! Booking domain model.
//!
//! Bookings are embedded in their hotel and never change once written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub adult_count: u32,
    pub child_count: u32,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub total_cost: f64,
}

/// Guest details for a booking about to be appended to a hotel.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub adult_count: u32,
    pub child_count: u32,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub total_cost: f64,
}
