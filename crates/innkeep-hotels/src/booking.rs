//! Quote and confirm: the two-step booking workflow.
//!
//! A quote prices the stay and opens a payment intent tagged with the
//! hotel and user. Confirmation re-reads that intent from the processor
//! and only appends the booking once the charge has succeeded. The
//! stored total always comes from the intent amount.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use innkeep_core::error::InnkeepError;
use innkeep_core::gateway::PaymentGateway;
use innkeep_core::models::booking::{Booking, NewBooking};
use innkeep_core::models::hotel::Hotel;
use innkeep_core::models::payment::{CreatePaymentIntent, to_minor_units};
use innkeep_core::repository::HotelRepository;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::BookingError;

/// Answer to a quote request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQuote {
    pub payment_intent_id: String,
    pub client_secret: String,
    pub total_cost: f64,
}

/// Guest details submitted once the payment has been made.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "check_stay"))]
pub struct ConfirmBooking {
    #[validate(length(min = 1, message = "Payment intent is required"))]
    pub payment_intent_id: String,
    #[validate(length(min = 1, message = "First Name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last Name is required"))]
    pub last_name: String,
    #[validate(email(message = "Email is required"))]
    pub email: String,
    #[validate(range(min = 1, message = "At least one adult is required"))]
    pub adult_count: u32,
    pub child_count: u32,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

fn check_stay(booking: &ConfirmBooking) -> Result<(), ValidationError> {
    if booking.check_out <= booking.check_in {
        let mut err = ValidationError::new("stay");
        err.message = Some("Check-out must be after check-in".into());
        return Err(err);
    }
    Ok(())
}

pub struct BookingService<H: HotelRepository> {
    hotels: H,
    payments: Arc<dyn PaymentGateway>,
}

impl<H: HotelRepository> BookingService<H> {
    pub fn new(hotels: H, payments: Arc<dyn PaymentGateway>) -> Self {
        Self { hotels, payments }
    }

    async fn hotel(&self, hotel_id: Uuid) -> Result<Hotel, BookingError> {
        match self.hotels.get_by_id(hotel_id).await {
            Ok(hotel) => Ok(hotel),
            Err(InnkeepError::NotFound { .. }) => Err(BookingError::HotelNotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Price `nights` at the hotel and open a payment intent for it.
    pub async fn quote(
        &self,
        hotel_id: Uuid,
        user_id: Uuid,
        nights: u32,
    ) -> Result<PaymentQuote, BookingError> {
        if nights < 1 {
            return Err(InnkeepError::validation("Number of nights must be at least 1").into());
        }

        let hotel = self.hotel(hotel_id).await?;
        let total_cost = hotel.price_per_night * f64::from(nights);

        let intent = self
            .payments
            .create_intent(CreatePaymentIntent {
                amount: to_minor_units(total_cost),
                hotel_id,
                user_id,
            })
            .await?;

        let client_secret = intent.client_secret.ok_or_else(|| {
            InnkeepError::Internal(format!("payment intent {} has no client secret", intent.id))
        })?;

        info!(%hotel_id, %user_id, nights, total_cost, intent = %intent.id, "Booking quoted");
        Ok(PaymentQuote {
            payment_intent_id: intent.id,
            client_secret,
            total_cost,
        })
    }

    /// Check the payment behind `input` and append the booking.
    pub async fn confirm(
        &self,
        hotel_id: Uuid,
        user_id: Uuid,
        input: ConfirmBooking,
    ) -> Result<Booking, BookingError> {
        input.validate().map_err(InnkeepError::from)?;

        let intent = match self.payments.retrieve_intent(&input.payment_intent_id).await {
            Ok(intent) => intent,
            Err(e) => {
                warn!(intent = %input.payment_intent_id, error = %e, "Payment intent lookup failed");
                return Err(BookingError::PaymentIntentNotFound);
            }
        };

        let hotel_str = hotel_id.to_string();
        let user_str = user_id.to_string();
        if intent.hotel_id() != Some(hotel_str.as_str()) || intent.user_id() != Some(user_str.as_str())
        {
            warn!(intent = %intent.id, %hotel_id, %user_id, "Payment intent does not belong to this booking");
            return Err(BookingError::PaymentIntentMismatch);
        }

        if !intent.is_succeeded() {
            warn!(intent = %intent.id, status = %intent.status, "Payment not succeeded");
            return Err(BookingError::PaymentNotSucceeded {
                status: intent.status,
            });
        }

        let booking = NewBooking {
            user_id,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            adult_count: input.adult_count,
            child_count: input.child_count,
            check_in: input.check_in,
            check_out: input.check_out,
            total_cost: intent.major_amount(),
        };

        let booking = match self.hotels.add_booking(hotel_id, booking).await {
            Ok(booking) => booking,
            Err(InnkeepError::NotFound { .. }) => return Err(BookingError::HotelNotFound),
            Err(e) => return Err(e.into()),
        };

        info!(%hotel_id, %user_id, booking_id = %booking.id, "Booking confirmed");
        Ok(booking)
    }

    /// Hotels the user has booked, each narrowed to the user's bookings.
    pub async fn my_bookings(&self, user_id: Uuid) -> Result<Vec<Hotel>, BookingError> {
        Ok(self.hotels.list_booked_by(user_id).await?)
    }
}
