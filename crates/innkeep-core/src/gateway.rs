//! Traits for the external collaborators Innkeep delegates to.
//!
//! Unlike the repositories these are object safe: the server holds one
//! `Arc<dyn ...>` per collaborator and tests swap in in-memory doubles.

use async_trait::async_trait;

use crate::error::InnkeepResult;
use crate::models::payment::{CreatePaymentIntent, PaymentIntent};

/// Payment processor that owns the lifecycle of payment intents.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_intent(&self, input: CreatePaymentIntent) -> InnkeepResult<PaymentIntent>;

    async fn retrieve_intent(&self, id: &str) -> InnkeepResult<PaymentIntent>;
}

/// Raw image bytes received from a host.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Media host that turns uploaded bytes into a durable URL.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, image: ImageUpload) -> InnkeepResult<String>;
}
