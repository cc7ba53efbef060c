use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use crate::domain::models::transaction::{InventoryTransaction, TransactionType};
use crate::storage::connection::DbConnection;

/// Result of trying to take stock out of an item
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundOutcome {
    /// The "out" row was appended; `balance` is the balance after it
    Recorded {
        transaction: InventoryTransaction,
        balance: i64,
    },
    /// No master row exists for the item; nothing was written
    UnknownItem,
    /// The movement would take the balance below zero; nothing was written
    InsufficientStock { available: i64 },
}

/// Repository for the inventory ledger
#[derive(Clone)]
pub struct TransactionRepository {
    db: DbConnection,
}

impl TransactionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Append a single ledger row
    pub async fn append_transaction(
        &self,
        item_id: &str,
        transaction_type: TransactionType,
        quantity: i64,
        transaction_date: NaiveDate,
    ) -> Result<InventoryTransaction> {
        let mut conn = self.db.pool().acquire().await?;
        insert_ledger_row(&mut *conn, item_id, transaction_type, quantity, transaction_date).await
    }

    /// Append an "out" row for an existing item, refusing to drive its
    /// balance negative. The check and the append share one transaction.
    pub async fn append_outbound(
        &self,
        item_id: &str,
        quantity: i64,
        transaction_date: NaiveDate,
    ) -> Result<OutboundOutcome> {
        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .context("failed to begin outbound transaction")?;

        // Write first so this transaction holds the write lock before it reads
        let transaction =
            insert_ledger_row(&mut *tx, item_id, TransactionType::Out, quantity, transaction_date)
                .await?;

        let item_exists = sqlx::query("SELECT 1 FROM inventory WHERE item_id = ?")
            .bind(item_id)
            .fetch_optional(&mut *tx)
            .await?
            .is_some();
        if !item_exists {
            tx.rollback().await?;
            return Ok(OutboundOutcome::UnknownItem);
        }

        let balance = ledger_balance(&mut *tx, item_id).await?;
        if balance < 0 {
            tx.rollback().await?;
            return Ok(OutboundOutcome::InsufficientStock {
                available: balance + quantity,
            });
        }

        tx.commit().await.context("failed to commit outbound transaction")?;
        Ok(OutboundOutcome::Recorded { transaction, balance })
    }

    /// The whole ledger in append order
    pub async fn list_transactions(&self) -> Result<Vec<InventoryTransaction>> {
        let rows = sqlx::query(
            r#"
            SELECT transaction_id, item_id, transaction_type, quantity, transaction_date
            FROM inventory_transactions
            ORDER BY transaction_id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(transaction_from_row).collect()
    }

    /// Ledger rows for one item in append order
    pub async fn list_transactions_for_item(&self, item_id: &str) -> Result<Vec<InventoryTransaction>> {
        let rows = sqlx::query(
            r#"
            SELECT transaction_id, item_id, transaction_type, quantity, transaction_date
            FROM inventory_transactions
            WHERE item_id = ?
            ORDER BY transaction_id ASC
            "#,
        )
        .bind(item_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(transaction_from_row).collect()
    }
}

/// Insert a ledger row on an existing connection (or open transaction) and
/// return it with its assigned id
pub(crate) async fn insert_ledger_row(
    conn: &mut SqliteConnection,
    item_id: &str,
    transaction_type: TransactionType,
    quantity: i64,
    transaction_date: NaiveDate,
) -> Result<InventoryTransaction> {
    let result = sqlx::query(
        r#"
        INSERT INTO inventory_transactions (item_id, transaction_type, quantity, transaction_date)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(item_id)
    .bind(transaction_type.as_str())
    .bind(quantity)
    .bind(transaction_date)
    .execute(&mut *conn)
    .await
    .with_context(|| format!("failed to append '{}' transaction for item {}", transaction_type, item_id))?;

    Ok(InventoryTransaction {
        transaction_id: result.last_insert_rowid(),
        item_id: item_id.to_string(),
        transaction_type,
        quantity,
        transaction_date,
    })
}

/// Σ in − Σ out for one item, as seen by `conn`
pub(crate) async fn ledger_balance(conn: &mut SqliteConnection, item_id: &str) -> Result<i64> {
    ledger_balance_before(conn, item_id, i64::MAX).await
}

/// Balance of one item counting only rows appended before `transaction_id`
pub(crate) async fn ledger_balance_before(
    conn: &mut SqliteConnection,
    item_id: &str,
    transaction_id: i64,
) -> Result<i64> {
    let row = sqlx::query(
        r#"
        SELECT COALESCE(SUM(CASE WHEN transaction_type = 'out' THEN -quantity ELSE quantity END), 0) AS balance
        FROM inventory_transactions
        WHERE item_id = ? AND transaction_id < ?
        "#,
    )
    .bind(item_id)
    .bind(transaction_id)
    .fetch_one(&mut *conn)
    .await
    .with_context(|| format!("failed to sum ledger for item {}", item_id))?;

    Ok(row.try_get("balance")?)
}

fn transaction_from_row(row: &SqliteRow) -> Result<InventoryTransaction> {
    let raw_type: String = row.try_get("transaction_type")?;
    let transaction_type = raw_type
        .parse::<TransactionType>()
        .with_context(|| format!("corrupt ledger row {:?}", row.try_get::<i64, _>("transaction_id").ok()))?;

    Ok(InventoryTransaction {
        transaction_id: row.try_get("transaction_id")?,
        item_id: row.try_get("item_id")?,
        transaction_type,
        quantity: row.try_get("quantity")?,
        transaction_date: row.try_get("transaction_date")?,
    })
}
