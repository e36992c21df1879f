//! The module contains the errors the engine can return.
//!
//! Most conditions in the budget core degrade to a safe default instead of
//! failing (see [`load`] and the statistics functions). What is left:
//!
//! - [`InvalidAmount`] when user input is not a non-negative decimal.
//! - [`InvalidEntry`] when a required entry field is empty.
//! - [`ExistingKey`] when an entry id is already in the store.
//! - [`Storage`], [`Json`] and [`Csv`] for persistence and export failures.
//!
//!  [`load`]: crate::store::load
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidEntry`]: EngineError::InvalidEntry
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`Storage`]: EngineError::Storage
//!  [`Json`]: EngineError::Json
//!  [`Csv`]: EngineError::Csv
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
    #[error("Invalid month: {0}")]
    InvalidMonth(String),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidEntry(a), Self::InvalidEntry(b)) => a == b,
            (Self::InvalidMonth(a), Self::InvalidMonth(b)) => a == b,
            (Self::UnknownCategory(a), Self::UnknownCategory(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::Storage(a), Self::Storage(b)) => a.kind() == b.kind(),
            (Self::Json(a), Self::Json(b)) => a.to_string() == b.to_string(),
            (Self::Csv(a), Self::Csv(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
