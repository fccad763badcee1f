//! Service collaborator error types.

use uuid::Uuid;

/// Unified error type for the mocked service backends.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    // -- Auth errors ---------------------------------------------------------
    /// No account exists for the given email.
    #[error("no user found for `{email}`")]
    UserNotFound { email: String },

    /// An account already exists for the given email.
    #[error("user already exists for `{email}`")]
    UserAlreadyExists { email: String },

    /// The supplied credentials were rejected.
    #[error("invalid credentials for `{email}`")]
    InvalidCredentials { email: String },

    // -- Template request errors ---------------------------------------------
    /// The referenced custom template request does not exist.
    #[error("template request not found: {id}")]
    RequestNotFound { id: Uuid },

    /// A submitted request is missing required fields.
    #[error("invalid template request: {reason}")]
    InvalidRequest { reason: String },

    // -- Generic -------------------------------------------------------------
    /// Catch-all for unexpected internal errors.
    #[error("internal service error: {0}")]
    Internal(String),
}

/// Convenience alias used throughout the services crate.
pub type Result<T> = std::result::Result<T, ServiceError>;
