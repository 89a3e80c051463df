//! Shared application state.

use std::sync::Arc;

use innkeep_auth::{AuthConfig, AuthService};
use innkeep_core::gateway::{MediaStore, PaymentGateway};
use innkeep_db::repository::{SurrealHotelRepository, SurrealUserRepository};
use innkeep_hotels::{BookingService, HotelService};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

pub type UserRepo = SurrealUserRepository<Any>;
pub type HotelRepo = SurrealHotelRepository<Any>;

pub struct AppState {
    pub auth: AuthService<UserRepo>,
    pub hotels: HotelService<HotelRepo>,
    pub bookings: BookingService<HotelRepo>,
    /// Mark session cookies `Secure`.
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(
        db: Surreal<Any>,
        auth: AuthConfig,
        payments: Arc<dyn PaymentGateway>,
        media: Arc<dyn MediaStore>,
        secure_cookies: bool,
    ) -> Arc<Self> {
        let users = SurrealUserRepository::new(db.clone());
        let hotels = SurrealHotelRepository::new(db);

        Arc::new(Self {
            auth: AuthService::new(users, auth),
            hotels: HotelService::new(hotels.clone(), media),
            bookings: BookingService::new(hotels, payments),
            secure_cookies,
        })
    }
}
