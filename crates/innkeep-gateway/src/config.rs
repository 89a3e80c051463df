//! Adapter configuration.

/// Stripe REST API settings.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (`sk_...`).
    pub api_key: String,
    pub base_url: String,
    /// ISO currency code for new intents, lower case.
    pub currency: String,
    pub timeout_secs: u64,
}

impl StripeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.stripe.com".into(),
            currency: "gbp".into(),
            timeout_secs: 10,
        }
    }
}

/// Cloudinary upload API settings.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl CloudinaryConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            base_url: "https://api.cloudinary.com".into(),
            timeout_secs: 30,
        }
    }
}
