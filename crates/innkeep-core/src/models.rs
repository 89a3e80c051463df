//! Domain models for Innkeep.
//!
//! These are the core types shared across all crates. Wire
//! serialization follows the camelCase JSON the frontend consumes.

pub mod booking;
pub mod hotel;
pub mod payment;
pub mod user;
