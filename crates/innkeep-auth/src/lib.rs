//! Innkeep Auth: password authentication and session token
//! issuance/validation.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AuthService, LoginInput, RegisterInput, Session};
pub use token::SessionClaims;
