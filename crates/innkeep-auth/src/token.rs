//! HS256 session token issuance and verification.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// JWT claims embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: user ID (UUID string).
    pub sub: String,
    /// Issuer.
    pub iss: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

impl SessionClaims {
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub)
            .map_err(|e| AuthError::TokenInvalid(format!("bad subject: {e}")))
    }
}

/// Issue a signed HS256 session token valid from now.
pub fn issue_token(user_id: Uuid, config: &AuthConfig) -> Result<String, AuthError> {
    issue_token_at(user_id, Utc::now(), config)
}

/// Issue a session token as if it had been issued at `issued_at`.
pub fn issue_token_at(
    user_id: Uuid,
    issued_at: DateTime<Utc>,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let iat = issued_at.timestamp();
    let claims = SessionClaims {
        sub: user_id.to_string(),
        iss: config.jwt_issuer.clone(),
        iat,
        exp: iat + config.token_lifetime_secs as i64,
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Decode and verify a session token (signature, expiry, issuer).
pub fn decode_token(token: &str, config: &AuthConfig) -> Result<SessionClaims, AuthError> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.jwt_issuer]);
    validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);
    validation.leeway = 0;

    jsonwebtoken::decode::<SessionClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}
