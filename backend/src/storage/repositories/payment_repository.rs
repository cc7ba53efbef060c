use anyhow::{Context, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::payment::{PaymentMethod, PaymentRecord};
use crate::storage::connection::DbConnection;

/// Repository for payment rows
#[derive(Clone)]
pub struct PaymentRepository {
    db: DbConnection,
}

impl PaymentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Append a payment row. There is no key, so repeated payments are kept.
    pub async fn append_payment(&self, payment: &PaymentRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (worker_id, worker_name, payment_date, amount_paid, payment_method)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&payment.worker_id)
        .bind(&payment.worker_name)
        .bind(payment.payment_date)
        .bind(payment.amount_paid)
        .bind(payment.payment_method.label())
        .execute(self.db.pool())
        .await
        .with_context(|| format!("failed to store payment for worker {}", payment.worker_id))?;
        Ok(())
    }

    /// List all payments in the order they were recorded
    pub async fn list_payments(&self) -> Result<Vec<PaymentRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT worker_id, worker_name, payment_date, amount_paid, payment_method
            FROM payments
            ORDER BY ROWID ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(payment_from_row).collect()
    }

    /// List one worker's payments in the order they were recorded
    pub async fn list_payments_for_worker(&self, worker_id: &str) -> Result<Vec<PaymentRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT worker_id, worker_name, payment_date, amount_paid, payment_method
            FROM payments
            WHERE worker_id = ?
            ORDER BY ROWID ASC
            "#,
        )
        .bind(worker_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(payment_from_row).collect()
    }
}

fn payment_from_row(row: &SqliteRow) -> Result<PaymentRecord> {
    let raw_method: String = row.try_get("payment_method")?;
    let payment_method = raw_method
        .parse::<PaymentMethod>()
        .context("corrupt payment row")?;

    Ok(PaymentRecord {
        worker_id: row.try_get("worker_id")?,
        worker_name: row.try_get::<Option<String>, _>("worker_name")?.unwrap_or_default(),
        payment_date: row.try_get("payment_date")?,
        amount_paid: row.try_get("amount_paid")?,
        payment_method,
    })
}
