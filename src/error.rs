use serde::{Deserialize, Serialize};
use std::fmt;

/// A failure reported by the generation service, as surfaced by the transport.
///
/// `status` and `reason` are filled in whenever the service answered with a
/// structured error envelope. Transports that only have a message leave them
/// empty and classification falls back to the message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    pub status: Option<u16>,
    pub reason: Option<String>,
    pub message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            reason: None,
            message: message.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, &self.reason) {
            (Some(status), Some(reason)) => write!(f, "{} {}: {}", status, reason, self.message),
            (Some(status), None) => write!(f, "{}: {}", status, self.message),
            (None, Some(reason)) => write!(f, "{}: {}", reason, self.message),
            (None, None) => write!(f, "{}", self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("No API key configured: register a key or set the environment default")]
    MissingCredential,
    #[error("Access denied: {0}")]
    AccessDenied(String),
    #[error("Billing required: {0}")]
    BillingRequired(String),
    #[error("Rate limited: {0}")]
    RateLimited(String),
    #[error("The model declined to produce an image: {0}")]
    ModelRefusal(String),
    #[error("The service returned no image")]
    NoImageProduced,
    #[error("Service error: {0}")]
    Service(ServiceError),
    #[error("Request error: {0}")]
    Request(String),
    #[error("Response error: {0}")]
    Response(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<ServiceError> for GenerationError {
    fn from(err: ServiceError) -> Self {
        GenerationError::Service(err)
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
