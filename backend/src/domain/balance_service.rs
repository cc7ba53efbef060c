//! Balance engine for the inventory ledger.
//!
//! An item's balance is Σ quantity of its "in" rows minus Σ quantity of its
//! "out" rows. Balances are never stored: every read loads the master list
//! and the ledger and recomputes, so a balance always reflects the ledger as
//! of the request.

use anyhow::anyhow;
use log::info;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::errors::ServiceError;
use crate::domain::models::inventory::InventoryItem;
use crate::domain::models::transaction::InventoryTransaction;
use crate::storage::{DbConnection, InventoryRepository, TransactionRepository};

/// Derived on-hand quantity for one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemBalance {
    pub item_id: String,
    pub item_name: String,
    pub balance: i64,
}

/// Compute one balance per master row, sorted by item id.
///
/// Items without ledger rows get 0. Ledger rows whose item has no master row
/// are ignored. A total outside the `i64` range means the ledger was written
/// around the intake checks and is reported as an error.
pub fn compute_balances(
    items: &[InventoryItem],
    ledger: &[InventoryTransaction],
) -> anyhow::Result<Vec<ItemBalance>> {
    let mut totals: HashMap<&str, i128> = HashMap::new();
    for transaction in ledger {
        *totals.entry(transaction.item_id.as_str()).or_insert(0) +=
            i128::from(transaction.signed_quantity());
    }

    let mut balances = items
        .iter()
        .map(|item| {
            let total = totals.get(item.item_id.as_str()).copied().unwrap_or(0);
            let balance = i64::try_from(total).map_err(|_| {
                anyhow!("ledger total {} for item {} is out of range", total, item.item_id)
            })?;
            Ok(ItemBalance {
                item_id: item.item_id.clone(),
                item_name: item.item_name.clone(),
                balance,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    balances.sort_by(|a, b| a.item_id.cmp(&b.item_id));
    Ok(balances)
}

/// Service responsible for balance queries
#[derive(Clone)]
pub struct BalanceService {
    inventory_repository: InventoryRepository,
    transaction_repository: TransactionRepository,
}

impl BalanceService {
    pub fn new(db: Arc<DbConnection>) -> Self {
        let inventory_repository = InventoryRepository::new((*db).clone());
        let transaction_repository = TransactionRepository::new((*db).clone());
        Self {
            inventory_repository,
            transaction_repository,
        }
    }

    /// Balances for every item in the master list
    pub async fn current_balances(&self) -> Result<Vec<ItemBalance>, ServiceError> {
        let items = self.inventory_repository.list_items().await?;
        let ledger = self.transaction_repository.list_transactions().await?;

        let balances = compute_balances(&items, &ledger)?;
        info!(
            "Computed {} balances from {} ledger rows",
            balances.len(),
            ledger.len()
        );
        Ok(balances)
    }

    /// Balance of a single item; NotFound if it has no master row
    pub async fn balance_for(&self, item_id: &str) -> Result<ItemBalance, ServiceError> {
        let item_id = item_id.trim();
        let item = self
            .inventory_repository
            .get_item(item_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Item", item_id))?;
        let ledger = self
            .transaction_repository
            .list_transactions_for_item(item_id)
            .await?;

        compute_balances(std::slice::from_ref(&item), &ledger)?
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::not_found("Item", item_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::inventory::{AddItemCommand, RecordOutboundCommand};
    use crate::domain::inventory_service::InventoryService;
    use crate::domain::models::transaction::TransactionType;
    use chrono::NaiveDate;

    fn item(item_id: &str, item_name: &str) -> InventoryItem {
        InventoryItem {
            item_id: item_id.to_string(),
            item_name: item_name.to_string(),
            quantity: 0,
            date_of_arrival: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            supplier_details: String::new(),
        }
    }

    fn movement(id: i64, item_id: &str, transaction_type: TransactionType, quantity: i64) -> InventoryTransaction {
        InventoryTransaction {
            transaction_id: id,
            item_id: item_id.to_string(),
            transaction_type,
            quantity,
            transaction_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    fn balance(item_id: &str, item_name: &str, balance: i64) -> ItemBalance {
        ItemBalance {
            item_id: item_id.to_string(),
            item_name: item_name.to_string(),
            balance,
        }
    }

    #[test]
    fn test_compute_balances_nets_in_and_out() {
        let items = vec![item("B", "Bolt"), item("A", "Anchor"), item("C", "Chain")];
        let ledger = vec![
            movement(1, "A", TransactionType::In, 10),
            movement(2, "B", TransactionType::In, 3),
            movement(3, "A", TransactionType::Out, 4),
            movement(4, "A", TransactionType::In, 1),
            // orphan row, no master entry
            movement(5, "Z", TransactionType::In, 100),
        ];

        assert_eq!(
            compute_balances(&items, &ledger).unwrap(),
            vec![
                balance("A", "Anchor", 7),
                balance("B", "Bolt", 3),
                balance("C", "Chain", 0),
            ]
        );
    }

    #[test]
    fn test_compute_balances_is_deterministic_for_shuffled_input() {
        let items = vec![item("A", "Anchor"), item("B", "Bolt")];
        let ledger = vec![
            movement(1, "A", TransactionType::In, 2),
            movement(2, "B", TransactionType::In, 5),
        ];
        let mut reversed_items = items.clone();
        reversed_items.reverse();
        let mut reversed_ledger = ledger.clone();
        reversed_ledger.reverse();

        assert_eq!(
            compute_balances(&items, &ledger).unwrap(),
            compute_balances(&reversed_items, &reversed_ledger).unwrap()
        );
    }

    #[test]
    fn test_compute_balances_empty() {
        assert!(compute_balances(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_compute_balances_reports_out_of_range_total() {
        let items = vec![item("A", "Anchor")];
        let ledger = vec![
            movement(1, "A", TransactionType::In, i64::MAX),
            movement(2, "A", TransactionType::In, i64::MAX),
        ];

        let err = compute_balances(&items, &ledger).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_compute_balances_intermediate_sum_may_exceed_range() {
        let items = vec![item("A", "Anchor")];
        let ledger = vec![
            movement(1, "A", TransactionType::In, i64::MAX),
            movement(2, "A", TransactionType::In, 5),
            movement(3, "A", TransactionType::Out, 10),
        ];

        assert_eq!(
            compute_balances(&items, &ledger).unwrap(),
            vec![balance("A", "Anchor", i64::MAX - 5)]
        );
    }

    async fn create_services() -> (InventoryService, BalanceService) {
        let db = Arc::new(DbConnection::init_test().await.unwrap());
        (InventoryService::new(db.clone()), BalanceService::new(db))
    }

    fn add(item_id: &str, quantity: i64, date: &str) -> AddItemCommand {
        AddItemCommand {
            item_id: item_id.to_string(),
            item_name: "Widget".to_string(),
            quantity,
            date_of_arrival: date.to_string(),
            supplier_details: "Acme".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ledger_accumulates_while_master_row_is_overwritten() {
        let (inventory, balances) = create_services().await;

        inventory.add_item(add("SKU1", 10, "2024-01-01")).await.unwrap();
        assert_eq!(
            balances.current_balances().await.unwrap(),
            vec![balance("SKU1", "Widget", 10)]
        );

        inventory.add_item(add("SKU1", 5, "2024-01-02")).await.unwrap();
        assert_eq!(inventory.get_item("SKU1").await.unwrap().quantity, 5);
        assert_eq!(
            balances.current_balances().await.unwrap(),
            vec![balance("SKU1", "Widget", 15)]
        );
    }

    #[tokio::test]
    async fn test_balance_reflects_outbound_movements() {
        let (inventory, balances) = create_services().await;
        inventory.add_item(add("SKU1", 8, "2024-01-01")).await.unwrap();
        inventory.add_item(add("SKU2", 2, "2024-01-01")).await.unwrap();
        inventory
            .record_outbound(RecordOutboundCommand {
                item_id: "SKU1".to_string(),
                quantity: 3,
                transaction_date: "2024-01-05".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(balances.balance_for("SKU1").await.unwrap().balance, 5);
        assert_eq!(balances.balance_for("SKU2").await.unwrap().balance, 2);
    }

    #[tokio::test]
    async fn test_balances_survive_a_refused_overflowing_receipt() {
        let (inventory, balances) = create_services().await;
        inventory.add_item(add("SKU1", i64::MAX, "2024-01-01")).await.unwrap();
        assert!(inventory.add_item(add("SKU1", i64::MAX, "2024-01-02")).await.is_err());

        assert_eq!(
            balances.current_balances().await.unwrap(),
            vec![balance("SKU1", "Widget", i64::MAX)]
        );
        assert_eq!(balances.balance_for(" SKU1 ").await.unwrap().balance, i64::MAX);
    }

    #[tokio::test]
    async fn test_balance_for_missing_item() {
        let (_, balances) = create_services().await;
        let err = balances.balance_for("SKU1").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }
}
