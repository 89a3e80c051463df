//! Hotel domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::booking::Booking;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub city: String,
    pub country: String,
    pub description: String,
    #[serde(rename = "type")]
    pub hotel_type: String,
    pub adult_count: u32,
    pub child_count: u32,
    pub facilities: Vec<String>,
    pub price_per_night: f64,
    pub star_rating: u8,
    pub image_urls: Vec<String>,
    pub last_updated: DateTime<Utc>,
    pub bookings: Vec<Booking>,
}

/// Host-editable hotel fields, as submitted on create and update.
///
/// `image_urls` holds the already-hosted images the host wants to keep;
/// freshly uploaded files are handled separately.
#[derive(Debug, Clone, Default, Validate)]
pub struct HotelFields {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Hotel type is required"))]
    pub hotel_type: String,
    #[validate(required(message = "Adult count is required and must be a number"))]
    pub adult_count: Option<u32>,
    #[validate(required(message = "Child count is required and must be a number"))]
    pub child_count: Option<u32>,
    #[validate(length(min = 1, message = "Facilities are required"))]
    pub facilities: Vec<String>,
    #[validate(
        required(message = "Price per night is required and must be a number"),
        range(min = 0.0, message = "Price per night must not be negative"),
        custom(function = "finite_price")
    )]
    pub price_per_night: Option<f64>,
    #[validate(
        required(message = "Star rating is required"),
        range(min = 1, max = 5, message = "Star rating must be between 1 and 5")
    )]
    pub star_rating: Option<u8>,
    pub image_urls: Vec<String>,
}

/// `NaN` slips past range checks and infinity cannot be charged.
fn finite_price(price: f64) -> Result<(), ValidationError> {
    if price.is_finite() {
        return Ok(());
    }
    let mut err = ValidationError::new("finite");
    err.message = Some("Price per night must be a number".into());
    Err(err)
}

/// A validated hotel document ready to be written.
#[derive(Debug, Clone)]
pub struct HotelRecord {
    pub name: String,
    pub city: String,
    pub country: String,
    pub description: String,
    pub hotel_type: String,
    pub adult_count: u32,
    pub child_count: u32,
    pub facilities: Vec<String>,
    pub price_per_night: f64,
    pub star_rating: u8,
    pub image_urls: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateHotel {
    pub user_id: Uuid,
    pub record: HotelRecord,
}

impl Hotel {
    /// Keep only the bookings made by `user_id`.
    pub fn retain_bookings_of(mut self, user_id: Uuid) -> Self {
        self.bookings.retain(|b| b.user_id == user_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> HotelFields {
        HotelFields {
            name: "Harbour Lodge".into(),
            city: "Bristol".into(),
            country: "England".into(),
            description: "By the water".into(),
            hotel_type: "Boutique".into(),
            adult_count: Some(2),
            child_count: Some(0),
            facilities: vec!["Free WiFi".into()],
            price_per_night: Some(85.0),
            star_rating: Some(4),
            image_urls: Vec::new(),
        }
    }

    #[test]
    fn valid_fields_pass() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn non_finite_prices_are_rejected() {
        for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let fields = HotelFields {
                price_per_night: Some(price),
                ..valid()
            };
            let errors = fields.validate().unwrap_err();
            assert!(
                errors.field_errors().contains_key("price_per_night"),
                "{price} accepted"
            );
        }
    }
}
