//! Innkeep Core: domain models, repository traits, external
//! collaborator traits, and the shared error type.

pub mod error;
pub mod gateway;
pub mod models;
pub mod repository;
pub mod search;

pub use error::{InnkeepError, InnkeepResult};
