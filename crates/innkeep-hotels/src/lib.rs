//! Innkeep Hotels: hotel management, search and the booking workflow.
//!
//! Services are generic over [`HotelRepository`](innkeep_core::repository::HotelRepository)
//! and hold the external collaborators as trait objects.

pub mod booking;
pub mod catalog;
pub mod error;

pub use booking::{BookingService, ConfirmBooking, PaymentQuote};
pub use catalog::{HotelService, MAX_IMAGE_BYTES, MAX_IMAGES};
pub use error::BookingError;
