use thiserror::Error;

use crate::pal::username::UsernameError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Username(#[from] UsernameError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Envelope code for this error.
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) | ServiceError::Username(_) => 403,
            ServiceError::NotFound(_) => 404,
            ServiceError::Db(_) | ServiceError::Model(_) => 500,
        }
    }

    /// Message safe to show a client. Storage errors collapse to a generic text.
    pub fn client_message(&self) -> String {
        match self {
            ServiceError::Validation(msg) => msg.clone(),
            ServiceError::Username(e) => e.to_string(),
            ServiceError::NotFound(msg) => msg.clone(),
            ServiceError::Db(_) | ServiceError::Model(_) => "server error".to_string(),
        }
    }
}
