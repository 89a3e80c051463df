//! Environment-driven configuration, loaded once at start-up.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use innkeep_auth::AuthConfig;
use innkeep_db::DbConfig;
use innkeep_gateway::{CloudinaryConfig, StripeConfig};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid {key} value: {message}")]
    Invalid { key: &'static str, message: String },
}

/// HTTP-facing settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// `APP_ENV=production`: session cookies get the `Secure` flag.
    pub production: bool,
    /// Allowed CORS origin. `None` mirrors the request origin.
    pub frontend_url: Option<String>,
    /// Prebuilt frontend served for non-API paths.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 7000,
            production: false,
            frontend_url: None,
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub db: DbConfig,
    pub auth: AuthConfig,
    pub stripe: StripeConfig,
    pub cloudinary: CloudinaryConfig,
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    var(key).ok_or(ConfigError::Missing(key))
}

fn try_load<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    match var(key) {
        None => {
            info!("{key} not set, using default");
            Ok(default)
        }
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key,
                message: e.to_string(),
            }
        }),
    }
}

fn try_load_string(key: &'static str, default: &str) -> String {
    var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let server = ServerConfig {
            port: try_load("PORT", 7000)?,
            production: var("APP_ENV").is_some_and(|v| v.eq_ignore_ascii_case("production")),
            frontend_url: var("FRONTEND_URL"),
            static_dir: var("STATIC_DIR").map(PathBuf::from),
        };

        let defaults = DbConfig::default();
        let db = DbConfig {
            url: try_load_string("DATABASE_URL", &defaults.url),
            namespace: try_load_string("DATABASE_NS", &defaults.namespace),
            database: try_load_string("DATABASE_DB", &defaults.database),
            username: var("DATABASE_USER"),
            password: var("DATABASE_PASS"),
        };

        let auth = AuthConfig {
            jwt_secret: required("JWT_SECRET_KEY")?,
            jwt_issuer: try_load_string("JWT_ISSUER", "innkeep"),
            pepper: var("PASSWORD_PEPPER"),
            ..AuthConfig::default()
        };

        let mut stripe = StripeConfig::new(required("STRIPE_API_KEY")?);
        stripe.currency = try_load_string("STRIPE_CURRENCY", &stripe.currency).to_lowercase();
        stripe.timeout_secs = try_load("STRIPE_TIMEOUT_SECS", stripe.timeout_secs)?;

        let mut cloudinary = CloudinaryConfig::new(
            required("CLOUDINARY_CLOUD_NAME")?,
            required("CLOUDINARY_API_KEY")?,
            required("CLOUDINARY_API_SECRET")?,
        );
        cloudinary.timeout_secs = try_load("CLOUDINARY_TIMEOUT_SECS", cloudinary.timeout_secs)?;

        Ok(Self {
            server,
            db,
            auth,
            stripe,
            cloudinary,
        })
    }
}
