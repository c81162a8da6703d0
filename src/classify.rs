use crate::error::{GenerationError, ServiceError};
use crate::models::ModelTier;

pub const BILLING_REQUIRED_MESSAGE: &str = "the pro image model needs a billing-enabled API key. \
Switch to the standard tier or register a paid API key.";
pub const ACCESS_DENIED_MESSAGE: &str = "the API key does not have access to this model. \
Check the key or register a different one.";
pub const RATE_LIMITED_MESSAGE: &str = "too many requests. Wait a moment and reduce your \
request rate before trying again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureClass {
    PermissionDenied,
    RateLimited,
    Unrecognized,
}

fn class_of_service_error(err: &ServiceError) -> FailureClass {
    match err.status {
        Some(403) => return FailureClass::PermissionDenied,
        Some(429) => return FailureClass::RateLimited,
        _ => {}
    }

    match err.reason.as_deref() {
        Some("PERMISSION_DENIED") => return FailureClass::PermissionDenied,
        Some("RESOURCE_EXHAUSTED") => return FailureClass::RateLimited,
        _ => {}
    }

    // Transports without a structured status only give us the message.
    class_of_message(&err.message)
}

fn class_of_message(message: &str) -> FailureClass {
    let lowered = message.to_ascii_lowercase();
    if lowered.contains("403")
        || lowered.contains("permission_denied")
        || lowered.contains("permission denied")
    {
        FailureClass::PermissionDenied
    } else if lowered.contains("429") || lowered.contains("resource_exhausted") {
        FailureClass::RateLimited
    } else {
        FailureClass::Unrecognized
    }
}

fn class_of(error: &GenerationError) -> FailureClass {
    match error {
        GenerationError::Service(err) => class_of_service_error(err),
        GenerationError::Request(message) => class_of_message(message),
        _ => FailureClass::Unrecognized,
    }
}

/// True when the failure is permission-class and should abort a whole batch.
pub fn is_permission_denied(error: &GenerationError) -> bool {
    matches!(
        error,
        GenerationError::AccessDenied(_) | GenerationError::BillingRequired(_)
    ) || class_of(error) == FailureClass::PermissionDenied
}

/// Maps a raw failure to its normalized form.
///
/// Unrecognized errors, including ones that were already classified, come back
/// unchanged. Callers always return the result as `Err`.
pub fn classify(error: GenerationError, tier: Option<ModelTier>) -> GenerationError {
    match class_of(&error) {
        FailureClass::PermissionDenied => {
            log::warn!("Permission denied by the generation service: {}", error);
            if tier == Some(ModelTier::Pro) {
                GenerationError::BillingRequired(BILLING_REQUIRED_MESSAGE.to_string())
            } else {
                GenerationError::AccessDenied(ACCESS_DENIED_MESSAGE.to_string())
            }
        }
        FailureClass::RateLimited => {
            log::warn!("Rate limited by the generation service: {}", error);
            GenerationError::RateLimited(RATE_LIMITED_MESSAGE.to_string())
        }
        FailureClass::Unrecognized => error,
    }
}
