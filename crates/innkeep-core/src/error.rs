//! Error types shared by every Innkeep crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InnkeepError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Booking rejected: {reason}")]
    BookingRejected { reason: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl InnkeepError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<validator::ValidationErrors> for InnkeepError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Flatten into messages, sorted for stable output.
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        messages.sort();
        Self::Validation {
            message: messages.join(", "),
        }
    }
}

pub type InnkeepResult<T> = Result<T, InnkeepError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Signup {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(range(min = 1, max = 5))]
        stars: u8,
    }

    #[test]
    fn validation_errors_are_flattened() {
        let signup = Signup {
            name: String::new(),
            stars: 9,
        };
        let err: InnkeepError = signup.validate().unwrap_err().into();
        match err {
            InnkeepError::Validation { message } => {
                assert!(message.contains("Name is required"), "{message}");
                assert!(message.contains("stars is invalid"), "{message}");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
