//! Payment intake and read-back.

use log::info;
use std::sync::Arc;

use crate::domain::commands::payment::{PaymentListQuery, RecordPaymentCommand, RecordPaymentResult};
use crate::domain::errors::{ServiceError, ValidationError};
use crate::domain::models::payment::{PaymentMethod, PaymentRecord};
use crate::domain::validation::{parse_date, require_identifier, require_non_negative_amount};
use crate::storage::{DbConnection, PaymentRepository};

#[derive(Clone)]
pub struct PaymentService {
    payment_repository: PaymentRepository,
}

impl PaymentService {
    pub fn new(db: Arc<DbConnection>) -> Self {
        Self {
            payment_repository: PaymentRepository::new((*db).clone()),
        }
    }

    /// Validate and append a "Record Payment" submission. Repeated identical
    /// submissions each produce a row.
    pub async fn record_payment(
        &self,
        command: RecordPaymentCommand,
    ) -> Result<RecordPaymentResult, ServiceError> {
        info!(
            "Recording payment of {:.2} to worker {} by {}",
            command.amount_paid, command.worker_id, command.payment_method
        );

        let payment = Self::validate(&command)?;
        self.payment_repository.append_payment(&payment).await?;

        let success_message = format!(
            "Payment of {:.2} to {} recorded ({})",
            payment.amount_paid, payment.worker_id, payment.payment_method
        );
        info!("{}", success_message);

        Ok(RecordPaymentResult {
            payment,
            success_message,
        })
    }

    fn validate(command: &RecordPaymentCommand) -> Result<PaymentRecord, ValidationError> {
        Ok(PaymentRecord {
            worker_id: require_identifier("Worker ID", &command.worker_id)?,
            worker_name: command.worker_name.trim().to_string(),
            payment_date: parse_date("Payment Date", &command.payment_date)?,
            amount_paid: require_non_negative_amount(command.amount_paid)?,
            payment_method: command.payment_method.parse::<PaymentMethod>()?,
        })
    }

    pub async fn list_payments(&self, query: PaymentListQuery) -> Result<Vec<PaymentRecord>, ServiceError> {
        let payments = match query.worker_id.as_deref().map(str::trim) {
            Some(worker_id) if !worker_id.is_empty() => {
                self.payment_repository.list_payments_for_worker(worker_id).await?
            }
            _ => self.payment_repository.list_payments().await?,
        };
        Ok(payments)
    }

    /// Methods offered by the payment form
    pub fn payment_methods(&self) -> &'static [PaymentMethod] {
        &PaymentMethod::ALL
    }
}
