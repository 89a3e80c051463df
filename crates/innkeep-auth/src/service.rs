//! Authentication service: registration, login and session checks.

use innkeep_core::error::{InnkeepError, InnkeepResult};
use innkeep_core::models::user::{CreateUser, User};
use innkeep_core::repository::UserRepository;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the registration flow.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[validate(email(message = "Email is required"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, message = "First Name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last Name is required"))]
    pub last_name: String,
}

/// Input for the login flow.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email(message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// A freshly issued session.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    /// Signed HS256 token, carried in the `auth_token` cookie.
    pub token: String,
}

/// Authentication service.
///
/// Generic over the user repository so that the auth layer has no
/// dependency on the database crate.
pub struct AuthService<U: UserRepository> {
    user_repo: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: U, config: AuthConfig) -> Self {
        Self { user_repo, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Create an account and sign it in.
    pub async fn register(&self, input: RegisterInput) -> InnkeepResult<Session> {
        let mut problems = match input.validate() {
            Ok(()) => Vec::new(),
            Err(e) => match InnkeepError::from(e) {
                InnkeepError::Validation { message } => vec![message],
                other => return Err(other),
            },
        };
        if input.password.chars().count() < self.config.min_password_length {
            problems.push(format!(
                "Password with {} or more characters required",
                self.config.min_password_length
            ));
        }
        if !problems.is_empty() {
            return Err(InnkeepError::validation(problems.join(", ")));
        }

        match self.user_repo.get_by_email(&input.email).await {
            Ok(_) => {
                return Err(InnkeepError::AlreadyExists {
                    entity: "user".into(),
                });
            }
            Err(InnkeepError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let password_hash =
            password::hash_password(&input.password, self.config.pepper.as_deref())?;
        let user = self
            .user_repo
            .create(CreateUser {
                email: input.email,
                password_hash,
                first_name: input.first_name,
                last_name: input.last_name,
            })
            .await?;
        info!(user_id = %user.id, "User registered");

        self.issue(user.id)
    }

    /// Check email and password and issue a session token.
    pub async fn login(&self, input: LoginInput) -> InnkeepResult<Session> {
        input.validate()?;

        let user = match self.user_repo.get_by_email(&input.email).await {
            Ok(user) => user,
            Err(InnkeepError::NotFound { .. }) => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        let valid = password::verify_password(
            &input.password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )?;

        if !valid {
            warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        self.issue(user.id)
    }

    /// Resolve the user id behind a session token. A missing token is
    /// treated like an invalid one.
    pub fn verify(&self, token: Option<&str>) -> InnkeepResult<Uuid> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::TokenMissing)?;
        let claims = token::decode_token(token, &self.config)?;
        Ok(claims.user_id()?)
    }

    /// Profile of the signed-in user.
    pub async fn current_user(&self, user_id: Uuid) -> InnkeepResult<User> {
        self.user_repo.get_by_id(user_id).await
    }

    fn issue(&self, user_id: Uuid) -> InnkeepResult<Session> {
        let token = token::issue_token(user_id, &self.config)?;
        Ok(Session { user_id, token })
    }
}
