use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid credentials")]
    Unauthorized,
    #[error("Not authorized for this resource")]
    Forbidden,
    #[error("Passcode does not match")]
    OtpMismatch,
    #[error("Passcode has expired")]
    OtpExpired,
    #[error("Internal error: {0}")]
    Internal(String),
}
