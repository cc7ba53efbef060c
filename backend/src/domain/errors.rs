//! Error types returned by the domain services.

use chrono::NaiveTime;

/// Input rejected before anything is written.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    EmptyIdentifier(&'static str),
    #[error("Quantity cannot be negative (got {0})")]
    NegativeQuantity(i64),
    #[error("Amount paid cannot be negative (got {0:.2})")]
    NegativeAmount(f64),
    #[error("Amount paid must be a finite number")]
    NonFiniteAmount,
    #[error("Unknown payment method '{0}'")]
    UnknownPaymentMethod(String),
    #[error("Unknown transaction type '{0}'")]
    UnknownTransactionType(String),
    #[error("Invalid {field} '{value}': expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
    #[error("Invalid {field} '{value}': expected HH:MM or HH:MM:SS")]
    InvalidTime { field: &'static str, value: String },
    #[error("Time of departure {departure} is earlier than time of arrival {arrival}")]
    DepartureBeforeArrival {
        arrival: NaiveTime,
        departure: NaiveTime,
    },
    #[error("Cannot remove {requested} of item {item_id}: only {available} on hand")]
    InsufficientStock {
        item_id: String,
        requested: i64,
        available: i64,
    },
    #[error("Receiving {quantity} of item {item_id} would overflow its balance of {balance}")]
    BalanceOverflow {
        item_id: String,
        quantity: i64,
        balance: i64,
    },
    #[error("Signature upload is empty")]
    EmptyUpload,
    #[error("Signature upload of {size} bytes exceeds the {limit} byte limit")]
    UploadTooLarge { size: usize, limit: usize },
    #[error("Unsupported image format: only PNG and JPEG signatures are accepted")]
    UnsupportedImage,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("Storage failure: {0:#}")]
    Storage(anyhow::Error),
}

impl From<anyhow::Error> for ServiceError {
    fn from(err: anyhow::Error) -> Self {
        ServiceError::Storage(err)
    }
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        ServiceError::NotFound {
            entity,
            id: id.into(),
        }
    }
}
