//! Result and error types for the core library

use std::collections::HashMap;

use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core library error type
///
/// Every variant except the trailing carriers (`Store`, `Io`, `Json`) is an
/// expected, user-facing condition. None are fatal to the process and none
/// trigger a retry: there is nothing to retry against offline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Insufficient balance: have {available}, need {requested}")]
    InsufficientBalance {
        available: Decimal,
        requested: Decimal,
    },

    #[error("Cannot send money to yourself")]
    SelfTransferRejected,

    #[error("This payment is not for you")]
    NotAddressedToMe,

    #[error("Payment {0} has already been received")]
    AlreadyProcessed(String),

    #[error("Invalid payment data: {0}")]
    InvalidPayload(String),

    #[error("Incorrect PIN. {attempts_remaining} attempt(s) remaining")]
    InvalidCredential { attempts_remaining: u32 },

    #[error("Account locked. Try again in {} second(s)", remaining.num_seconds().max(1))]
    LockedOut { remaining: Duration },

    #[error("No account found")]
    NoAccount,

    #[error("Session is invalid or expired")]
    SessionInvalid,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid-payload error
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Operation result with optional context (for host-app serialization)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub context: Option<HashMap<String, serde_json::Value>>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            context: None,
        }
    }

    /// Create a failed result
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            context: None,
        }
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail(e.to_string()),
        }
    }
}
