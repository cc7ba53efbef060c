use anyhow::{Context, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use crate::domain::models::inventory::InventoryItem;
use crate::domain::models::transaction::{InventoryTransaction, TransactionType};
use crate::storage::connection::DbConnection;
use crate::storage::repositories::transaction_repository::{insert_ledger_row, ledger_balance_before};

/// Result of trying to add an item with its receipt
#[derive(Debug, Clone, PartialEq)]
pub enum ReceiptOutcome {
    /// Master row and "in" row were written
    Recorded(InventoryTransaction),
    /// The receipt would overflow the item's balance; nothing was written
    BalanceOverflow { balance: i64 },
}

/// Repository for inventory master rows
#[derive(Clone)]
pub struct InventoryRepository {
    db: DbConnection,
}

impl InventoryRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert or replace the master row for `item.item_id`
    pub async fn upsert_item(&self, item: &InventoryItem) -> Result<()> {
        let mut conn = self.db.pool().acquire().await?;
        upsert_item_row(&mut *conn, item).await
    }

    /// Upsert the master row and append the matching "in" ledger row as one
    /// unit; either both are visible afterwards or neither is. A receipt that
    /// would push the item's balance past `i64::MAX` writes nothing.
    pub async fn store_item_with_receipt(&self, item: &InventoryItem) -> Result<ReceiptOutcome> {
        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .context("failed to begin add-item transaction")?;

        upsert_item_row(&mut *tx, item).await?;
        let receipt = insert_ledger_row(
            &mut *tx,
            &item.item_id,
            TransactionType::In,
            item.quantity,
            item.date_of_arrival,
        )
        .await?;

        let previous = ledger_balance_before(&mut *tx, &item.item_id, receipt.transaction_id).await?;
        if previous.checked_add(item.quantity).is_none() {
            tx.rollback().await?;
            return Ok(ReceiptOutcome::BalanceOverflow { balance: previous });
        }

        tx.commit().await.context("failed to commit add-item transaction")?;
        Ok(ReceiptOutcome::Recorded(receipt))
    }

    /// Get a master row by item id
    pub async fn get_item(&self, item_id: &str) -> Result<Option<InventoryItem>> {
        let row = sqlx::query(
            r#"
            SELECT item_id, item_name, quantity, date_of_arrival, supplier_details
            FROM inventory
            WHERE item_id = ?
            "#,
        )
        .bind(item_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(item_from_row).transpose()
    }

    /// List all master rows ordered by item id
    pub async fn list_items(&self) -> Result<Vec<InventoryItem>> {
        let rows = sqlx::query(
            r#"
            SELECT item_id, item_name, quantity, date_of_arrival, supplier_details
            FROM inventory
            ORDER BY item_id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(item_from_row).collect()
    }
}

async fn upsert_item_row(conn: &mut SqliteConnection, item: &InventoryItem) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR REPLACE INTO inventory (item_id, item_name, quantity, date_of_arrival, supplier_details)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&item.item_id)
    .bind(&item.item_name)
    .bind(item.quantity)
    .bind(item.date_of_arrival)
    .bind(&item.supplier_details)
    .execute(&mut *conn)
    .await
    .with_context(|| format!("failed to store inventory item {}", item.item_id))?;
    Ok(())
}

fn item_from_row(row: &SqliteRow) -> Result<InventoryItem> {
    Ok(InventoryItem {
        item_id: row.try_get("item_id")?,
        // free-text columns may be NULL in older data files
        item_name: row.try_get::<Option<String>, _>("item_name")?.unwrap_or_default(),
        quantity: row.try_get::<Option<i64>, _>("quantity")?.unwrap_or_default(),
        date_of_arrival: row.try_get("date_of_arrival")?,
        supplier_details: row
            .try_get::<Option<String>, _>("supplier_details")?
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::repositories::TransactionRepository;
    use chrono::NaiveDate;

    async fn setup_test() -> (InventoryRepository, TransactionRepository) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        (InventoryRepository::new(db.clone()), TransactionRepository::new(db))
    }

    fn widget(quantity: i64, supplier: &str) -> InventoryItem {
        InventoryItem {
            item_id: "SKU1".to_string(),
            item_name: "Widget".to_string(),
            quantity,
            date_of_arrival: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            supplier_details: supplier.to_string(),
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_row() {
        let (repo, _) = setup_test().await;

        repo.upsert_item(&widget(10, "Acme")).await.unwrap();
        repo.upsert_item(&widget(7, "Globex")).await.unwrap();

        let items = repo.list_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 7);
        assert_eq!(items[0].supplier_details, "Globex");
    }

    #[tokio::test]
    async fn test_store_item_with_receipt_writes_both_rows() {
        let (repo, ledger) = setup_test().await;

        let receipt = match repo.store_item_with_receipt(&widget(10, "Acme")).await.unwrap() {
            ReceiptOutcome::Recorded(receipt) => receipt,
            other => panic!("expected receipt to be recorded, got {:?}", other),
        };
        assert_eq!(receipt.transaction_type, TransactionType::In);
        assert_eq!(receipt.quantity, 10);
        assert_eq!(receipt.transaction_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        assert_eq!(repo.get_item("SKU1").await.unwrap(), Some(widget(10, "Acme")));
        assert_eq!(ledger.list_transactions().await.unwrap(), vec![receipt]);
    }

    #[tokio::test]
    async fn test_failed_receipt_rolls_back_master_row() {
        let db = DbConnection::init_test().await.unwrap();
        let repo = InventoryRepository::new(db.clone());
        repo.upsert_item(&widget(10, "Acme")).await.unwrap();

        // Make the ledger insert fail after the upsert has run
        sqlx::query("DROP TABLE inventory_transactions").execute(db.pool()).await.unwrap();

        let result = repo.store_item_with_receipt(&widget(99, "Globex")).await;
        assert!(result.is_err());

        // the earlier master row is untouched
        assert_eq!(repo.get_item("SKU1").await.unwrap(), Some(widget(10, "Acme")));
    }

    #[tokio::test]
    async fn test_receipt_overflowing_balance_is_refused() {
        let (repo, ledger) = setup_test().await;

        let first = repo.store_item_with_receipt(&widget(i64::MAX, "Acme")).await.unwrap();
        assert!(matches!(first, ReceiptOutcome::Recorded(_)));

        let second = repo.store_item_with_receipt(&widget(1, "Globex")).await.unwrap();
        assert_eq!(second, ReceiptOutcome::BalanceOverflow { balance: i64::MAX });

        // neither the master row nor the ledger saw the refused receipt
        assert_eq!(repo.get_item("SKU1").await.unwrap(), Some(widget(i64::MAX, "Acme")));
        assert_eq!(ledger.list_transactions().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_receipts_for_one_item_all_land() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("receipts.db").display());
        let db = DbConnection::new(&url, 5, std::time::Duration::from_secs(10)).await.unwrap();
        let repo = InventoryRepository::new(db.clone());

        let handles: Vec<_> = (0..10)
            .map(|n| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.store_item_with_receipt(&widget(n, "Acme")).await })
            })
            .collect();
        for handle in handles {
            let outcome = handle.await.unwrap().unwrap();
            assert!(matches!(outcome, ReceiptOutcome::Recorded(_)));
        }

        // one master row, ten receipts
        assert_eq!(repo.list_items().await.unwrap().len(), 1);
        let ledger = TransactionRepository::new(db.clone()).list_transactions().await.unwrap();
        assert_eq!(ledger.len(), 10);
        assert_eq!(ledger.iter().map(|t| t.quantity).sum::<i64>(), 45);
        db.close().await;
    }

    #[tokio::test]
    async fn test_get_missing_item() {
        let (repo, _) = setup_test().await;
        assert_eq!(repo.get_item("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_null_text_columns_read_as_empty() {
        let db = DbConnection::init_test().await.unwrap();
        sqlx::query("INSERT INTO inventory (item_id, item_name, quantity, date_of_arrival, supplier_details) VALUES ('SKU2', NULL, 3, '2023-12-31', NULL)")
            .execute(db.pool())
            .await
            .unwrap();

        let item = InventoryRepository::new(db).get_item("SKU2").await.unwrap().unwrap();
        assert_eq!(item.item_name, "");
        assert_eq!(item.supplier_details, "");
        assert_eq!(item.quantity, 3);
    }
}
