//! Domain model for worker payments.
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    MobileMoney,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Cash,
        PaymentMethod::BankTransfer,
        PaymentMethod::MobileMoney,
    ];

    /// Value stored in the `payment_method` column
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::MobileMoney => "Mobile Money",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    /// Accepts the stored labels, ignoring surrounding whitespace and case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|method| method.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownPaymentMethod(s.to_string()))
    }
}

/// Payments have no identity; identical submissions are separate rows.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    pub worker_id: String,
    pub worker_name: String,
    pub payment_date: NaiveDate,
    pub amount_paid: f64,
    pub payment_method: PaymentMethod,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payment_method_labels() {
        assert_eq!("Cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!(
            "bank transfer".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::BankTransfer
        );
        assert_eq!(
            " Mobile Money ".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::MobileMoney
        );
    }

    #[test]
    fn test_parse_unknown_payment_method() {
        let err = "Cheque".parse::<PaymentMethod>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownPaymentMethod("Cheque".to_string()));
    }
}
