//! Errors surfaced by the engine.
//!
//! The four business conditions map one-to-one onto the API surface:
//! [`Forbidden`] (member check failed), [`NotFound`] (missing group, user or
//! record), [`Validation`] (structurally invalid input, chiefly item-sum
//! mismatches), and the transparent [`Database`] infrastructure error.
//!
//! [`Forbidden`]: EngineError::Forbidden
//! [`NotFound`]: EngineError::NotFound
//! [`Validation`]: EngineError::Validation
//! [`Database`]: EngineError::Database

use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
