//! In-memory doubles for the payment processor and the media host.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use innkeep_core::error::{InnkeepError, InnkeepResult};
use innkeep_core::gateway::{ImageUpload, MediaStore, PaymentGateway};
use innkeep_core::models::payment::{CreatePaymentIntent, PaymentIntent, STATUS_SUCCEEDED};
use parking_lot::Mutex;

/// Payment processor that keeps intents in memory.
///
/// New intents start in `requires_payment_method`; tests move them
/// along with [`MockPaymentGateway::set_status`].
#[derive(Default)]
pub struct MockPaymentGateway {
    intents: Mutex<HashMap<String, PaymentIntent>>,
    next_id: AtomicU64,
    omit_client_secret: AtomicBool,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent intents come back without a client secret.
    pub fn omit_client_secret(&self) {
        self.omit_client_secret.store(true, Ordering::SeqCst);
    }

    /// Register an intent as-is, e.g. one carrying foreign metadata.
    pub fn insert(&self, intent: PaymentIntent) {
        self.intents.lock().insert(intent.id.clone(), intent);
    }

    pub fn set_status(&self, id: &str, status: &str) {
        if let Some(intent) = self.intents.lock().get_mut(id) {
            intent.status = status.to_string();
        }
    }

    /// Mark an intent as paid.
    pub fn succeed(&self, id: &str) {
        self.set_status(id, STATUS_SUCCEEDED);
    }

    pub fn get(&self, id: &str) -> Option<PaymentIntent> {
        self.intents.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.intents.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_intent(&self, input: CreatePaymentIntent) -> InnkeepResult<PaymentIntent> {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("pi_mock_{n}");
        let client_secret = (!self.omit_client_secret.load(Ordering::SeqCst))
            .then(|| format!("{id}_secret_{n}"));

        let intent = PaymentIntent {
            id: id.clone(),
            client_secret,
            status: "requires_payment_method".into(),
            amount: input.amount,
            currency: "gbp".into(),
            metadata: input.metadata(),
        };
        self.insert(intent.clone());
        Ok(intent)
    }

    async fn retrieve_intent(&self, id: &str) -> InnkeepResult<PaymentIntent> {
        self.get(id).ok_or_else(|| {
            InnkeepError::Upstream(format!("stripe returned 404: No such payment_intent: '{id}'"))
        })
    }
}

/// Media host that hands out fake URLs and remembers what it received.
#[derive(Default)]
pub struct MockMediaStore {
    uploads: Mutex<Vec<ImageUpload>>,
    fail: AtomicBool,
}

impl MockMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent upload fail.
    pub fn fail_uploads(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn uploads(&self) -> Vec<ImageUpload> {
        self.uploads.lock().clone()
    }
}

#[async_trait]
impl MediaStore for MockMediaStore {
    async fn upload(&self, image: ImageUpload) -> InnkeepResult<String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(InnkeepError::Upstream("media host unavailable".into()));
        }
        let name = image
            .file_name
            .clone()
            .unwrap_or_else(|| "image".to_string());
        let mut uploads = self.uploads.lock();
        uploads.push(image);
        Ok(format!("https://media.test/{}/{name}", uploads.len()))
    }
}
