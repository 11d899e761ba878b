pub mod account_repo;
pub mod cart_store;
pub mod catalog;
pub mod models;
pub mod order_repo;
pub mod smtp;

use crate::domain::errors::DomainError;

// Store-level failures surface as opaque internal errors; the detail stays in
// the error string for the log, never in a response body.

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}
