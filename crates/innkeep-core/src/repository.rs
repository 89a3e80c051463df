//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Hotel writes that belong to a
//! host take the owner's id so ownership is checked in the same query.

use uuid::Uuid;

use crate::error::InnkeepResult;
use crate::models::{
    booking::{Booking, NewBooking},
    hotel::{CreateHotel, Hotel, HotelRecord},
    user::{CreateUser, User},
};
use crate::search::{HotelSearch, SearchPage};

pub trait UserRepository: Send + Sync {
    /// Fails with `AlreadyExists` when the email is taken.
    fn create(&self, input: CreateUser) -> impl Future<Output = InnkeepResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = InnkeepResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = InnkeepResult<User>> + Send;
}

pub trait HotelRepository: Send + Sync {
    fn create(&self, input: CreateHotel) -> impl Future<Output = InnkeepResult<Hotel>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = InnkeepResult<Hotel>> + Send;
    /// Fetch a hotel only if `owner_id` owns it.
    fn get_owned(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = InnkeepResult<Hotel>> + Send;
    /// Replace the host-editable fields of an owned hotel. Bookings are
    /// left untouched.
    fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        record: HotelRecord,
    ) -> impl Future<Output = InnkeepResult<Hotel>> + Send;
    /// All hotels, most recently updated first.
    fn list(&self) -> impl Future<Output = InnkeepResult<Vec<Hotel>>> + Send;
    fn list_by_owner(&self, owner_id: Uuid)
    -> impl Future<Output = InnkeepResult<Vec<Hotel>>> + Send;
    fn search(
        &self,
        search: &HotelSearch,
    ) -> impl Future<Output = InnkeepResult<SearchPage<Hotel>>> + Send;

    /// Append a booking to a hotel's booking list in a single update.
    fn add_booking(
        &self,
        hotel_id: Uuid,
        booking: NewBooking,
    ) -> impl Future<Output = InnkeepResult<Booking>> + Send;
    /// Hotels holding at least one booking made by `user_id`.
    fn list_booked_by(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = InnkeepResult<Vec<Hotel>>> + Send;
}
