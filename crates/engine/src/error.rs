//! The module contains the errors the engine can throw.
//!
//! Every variant maps to exactly one HTTP status in the server crate:
//!
//! - [`KeyNotFound`] when a looked-up record does not exist.
//! - [`ExistingKey`] when a unique record already exists.
//! - [`InvalidInput`] when a request fails validation.
//! - [`CannotBook`] when the booking rules reject a reservation.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`InvalidInput`]: EngineError::InvalidInput
//!  [`CannotBook`]: EngineError::CannotBook
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Cannot enroll before the event start date")]
    EventNotStarted,
    #[error("Email or password are incorrect")]
    InvalidCredentials,
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Payment required: {0}")]
    PaymentRequired(String),
    #[error("Cannot book: {0}")]
    CannotBook(String),
    #[error("Postal code service error: {0}")]
    PostalCode(String),
    #[error("Crypto error: {0}")]
    Crypto(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::EventNotStarted, Self::EventNotStarted) => true,
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::Unauthorized(a), Self::Unauthorized(b)) => a == b,
            (Self::PaymentRequired(a), Self::PaymentRequired(b)) => a == b,
            (Self::CannotBook(a), Self::CannotBook(b)) => a == b,
            (Self::PostalCode(a), Self::PostalCode(b)) => a == b,
            (Self::Crypto(a), Self::Crypto(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
