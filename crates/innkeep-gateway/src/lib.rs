//! Innkeep Gateway: adapters for the payment processor (Stripe) and the
//! media host (Cloudinary).
//!
//! Both implement the object-safe traits in `innkeep_core::gateway`.
//! The `mock` feature adds in-memory doubles for tests.

mod cloudinary;
mod config;
mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod stripe;

pub use cloudinary::CloudinaryMediaStore;
pub use config::{CloudinaryConfig, StripeConfig};
pub use error::GatewayError;
pub use stripe::StripePaymentGateway;

fn http_client(timeout_secs: u64) -> Result<reqwest::Client, GatewayError> {
    Ok(reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()?)
}
