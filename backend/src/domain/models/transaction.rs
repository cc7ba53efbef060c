//! Domain model for a row of the inventory ledger.
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    In,
    Out,
}

impl TransactionType {
    /// Value stored in the `transaction_type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::In => "in",
            TransactionType::Out => "out",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(TransactionType::In),
            "out" => Ok(TransactionType::Out),
            other => Err(ValidationError::UnknownTransactionType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryTransaction {
    /// Assigned by the store, increases with every append
    pub transaction_id: i64,
    pub item_id: String,
    pub transaction_type: TransactionType,
    pub quantity: i64,
    pub transaction_date: NaiveDate,
}

impl InventoryTransaction {
    /// Contribution of this row to the item's balance
    pub fn signed_quantity(&self) -> i64 {
        match self.transaction_type {
            TransactionType::In => self.quantity,
            TransactionType::Out => -self.quantity,
        }
    }
}
