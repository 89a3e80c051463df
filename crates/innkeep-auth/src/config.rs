//! Authentication configuration.

/// Configuration for the authentication service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared secret for HS256 token signing.
    pub jwt_secret: String,
    /// JWT issuer (`iss` claim).
    pub jwt_issuer: String,
    /// Session token lifetime in seconds (default: 86_400 = 1 day).
    pub token_lifetime_secs: u64,
    /// Optional pepper prepended to passwords before Argon2id verification.
    pub pepper: Option<String>,
    /// Minimum password length for registration.
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_issuer: "innkeep".into(),
            token_lifetime_secs: 86_400,
            pepper: None,
            min_password_length: 6,
        }
    }
}
