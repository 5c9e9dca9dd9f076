//! Errors for the fleet store and its consumers
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FleetError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Event {0} is full")]
    EventFull(String),

    #[error("Database not initialized")]
    NotInitialized,
}

impl FleetError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

pub type FleetResult<T> = Result<T, FleetError>;
