//! Stripe payment intents over the form-encoded REST API.

use std::collections::HashMap;

use async_trait::async_trait;
use innkeep_core::error::InnkeepResult;
use innkeep_core::gateway::PaymentGateway;
use innkeep_core::models::payment::{CreatePaymentIntent, PaymentIntent};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::StripeConfig;
use crate::error::GatewayError;

const SERVICE: &str = "stripe";

/// Wire shape of a Stripe `payment_intent` object (fields we read).
#[derive(Debug, Deserialize)]
struct StripeIntent {
    id: String,
    client_secret: Option<String>,
    status: String,
    amount: i64,
    currency: String,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

impl From<StripeIntent> for PaymentIntent {
    fn from(wire: StripeIntent) -> Self {
        Self {
            id: wire.id,
            client_secret: wire.client_secret,
            status: wire.status,
            amount: wire.amount,
            currency: wire.currency,
            metadata: wire.metadata,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

/// Form fields for `POST /v1/payment_intents`.
fn intent_form(input: &CreatePaymentIntent, currency: &str) -> Vec<(String, String)> {
    let mut form = vec![
        ("amount".to_string(), input.amount.to_string()),
        ("currency".to_string(), currency.to_string()),
    ];
    let mut metadata: Vec<_> = input.metadata().into_iter().collect();
    metadata.sort();
    form.extend(
        metadata
            .into_iter()
            .map(|(key, value)| (format!("metadata[{key}]"), value)),
    );
    form
}

/// Intent ids come from clients and end up in the request path, so only
/// `pi_` followed by alphanumerics and underscores is let through.
fn checked_intent_id(id: &str) -> Result<&str, GatewayError> {
    let valid = id.strip_prefix("pi_").is_some_and(|rest| {
        !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    });
    if valid {
        Ok(id)
    } else {
        Err(GatewayError::InvalidId {
            service: SERVICE,
            id: id.to_string(),
        })
    }
}

pub struct StripePaymentGateway {
    http: reqwest::Client,
    config: StripeConfig,
}

impl StripePaymentGateway {
    pub fn new(config: StripeConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            http: crate::http_client(config.timeout_secs)?,
            config,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{path}", self.config.base_url.trim_end_matches('/'))
    }

    async fn read_intent(response: reqwest::Response) -> Result<PaymentIntent, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<StripeErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| "no error message".into());
            warn!(status = status.as_u16(), %message, "Stripe request failed");
            return Err(GatewayError::Api {
                service: SERVICE,
                status: status.as_u16(),
                message,
            });
        }

        let wire: StripeIntent = response.json().await.map_err(|e| GatewayError::Decode {
            service: SERVICE,
            message: e.to_string(),
        })?;
        Ok(wire.into())
    }
}

#[async_trait]
impl PaymentGateway for StripePaymentGateway {
    async fn create_intent(&self, input: CreatePaymentIntent) -> InnkeepResult<PaymentIntent> {
        debug!(amount = input.amount, hotel_id = %input.hotel_id, "Creating payment intent");
        let response = self
            .http
            .post(self.url("payment_intents"))
            .bearer_auth(&self.config.api_key)
            .form(&intent_form(&input, &self.config.currency))
            .send()
            .await
            .map_err(GatewayError::from)?;

        Ok(Self::read_intent(response).await?)
    }

    async fn retrieve_intent(&self, id: &str) -> InnkeepResult<PaymentIntent> {
        let id = checked_intent_id(id)?;
        let response = self
            .http
            .get(self.url(&format!("payment_intents/{id}")))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(GatewayError::from)?;

        Ok(Self::read_intent(response).await?)
    }
}
