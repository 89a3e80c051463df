//! SurrealDB repository implementations.

mod hotel;
mod user;

pub use hotel::SurrealHotelRepository;
pub use user::SurrealUserRepository;

use uuid::Uuid;

use crate::error::DbError;

fn parse_uuid(raw: &str, what: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(raw).map_err(|e| DbError::Corrupt(format!("invalid {what} UUID: {e}")))
}
