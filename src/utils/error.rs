use actix_web::HttpResponse;
use std::fmt;

use crate::models::Role;

/// Service-level error taxonomy. Every failure is terminal for the operation
/// that raised it and leaves persisted state unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// A form field failed validation. Surfaced next to the field.
    Validation { field: &'static str, message: String },
    /// Unknown email or wrong password.
    InvalidCredentials,
    /// Credentials are valid but the claimed role differs from the stored one.
    RoleMismatch { actual: Role },
    /// Signup with an email that is already registered.
    EmailTaken,
    /// FAQ question text already exists (case-insensitive).
    DuplicateQuestion,
    /// Student is already on the event's participant list.
    AlreadyRegistered,
    /// Event participant limit reached.
    EventFull,
    /// Event registration deadline has passed.
    DeadlinePassed,
    NotFound(String),
    Forbidden(String),
    /// The text-generation collaborator failed or returned garbage.
    ExternalService(String),
    /// The record store could not be written.
    Store(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Validation { field, message } => {
                write!(f, "Invalid {}: {}", field, message)
            }
            ServiceError::InvalidCredentials => write!(f, "Invalid credentials"),
            ServiceError::RoleMismatch { actual } => {
                write!(f, "This account is registered as {}", actual)
            }
            ServiceError::EmailTaken => write!(f, "Email is already registered"),
            ServiceError::DuplicateQuestion => write!(f, "A FAQ with this question already exists"),
            ServiceError::AlreadyRegistered => write!(f, "Already registered for this event"),
            ServiceError::EventFull => write!(f, "Event has reached its participant limit"),
            ServiceError::DeadlinePassed => write!(f, "Registration deadline has passed"),
            ServiceError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ServiceError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ServiceError::ExternalService(msg) => write!(f, "Assistant error: {}", msg),
            ServiceError::Store(msg) => write!(f, "Store error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    /// Maps the error to the standard `{"success": false, ...}` envelope with
    /// the matching HTTP status.
    pub fn to_response(&self) -> HttpResponse {
        let body = match self {
            ServiceError::RoleMismatch { actual } => serde_json::json!({
                "success": false,
                "error": self.to_string(),
                "actual_role": actual,
            }),
            ServiceError::Validation { field, .. } => serde_json::json!({
                "success": false,
                "error": self.to_string(),
                "field": field,
            }),
            _ => serde_json::json!({
                "success": false,
                "error": self.to_string(),
            }),
        };

        match self {
            ServiceError::Validation { .. } => HttpResponse::BadRequest().json(body),
            ServiceError::InvalidCredentials | ServiceError::RoleMismatch { .. } => {
                HttpResponse::Unauthorized().json(body)
            }
            ServiceError::EmailTaken
            | ServiceError::DuplicateQuestion
            | ServiceError::AlreadyRegistered
            | ServiceError::EventFull
            | ServiceError::DeadlinePassed => HttpResponse::Conflict().json(body),
            ServiceError::NotFound(_) => HttpResponse::NotFound().json(body),
            ServiceError::Forbidden(_) => HttpResponse::Forbidden().json(body),
            ServiceError::ExternalService(_) => HttpResponse::BadGateway().json(body),
            ServiceError::Store(_) => HttpResponse::InternalServerError().json(body),
        }
    }
}
