//! Inventory intake: the "Add Item" form and outbound stock movements.
//!
//! Adding an item overwrites the item's master row and appends an "in" row
//! to the ledger with the same quantity and date. The master row's quantity
//! is therefore only the last declared quantity; on-hand stock is derived
//! from the ledger by the balance service.

use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::inventory::{
    AddItemCommand, AddItemResult, RecordOutboundCommand, RecordOutboundResult, TransactionListQuery,
};
use crate::domain::errors::{ServiceError, ValidationError};
use crate::domain::models::inventory::InventoryItem;
use crate::domain::models::transaction::InventoryTransaction;
use crate::domain::validation::{parse_date, require_identifier, require_non_negative_quantity};
use crate::storage::{
    DbConnection, InventoryRepository, OutboundOutcome, ReceiptOutcome, TransactionRepository,
};

#[derive(Clone)]
pub struct InventoryService {
    inventory_repository: InventoryRepository,
    transaction_repository: TransactionRepository,
}

impl InventoryService {
    pub fn new(db: Arc<DbConnection>) -> Self {
        let inventory_repository = InventoryRepository::new((*db).clone());
        let transaction_repository = TransactionRepository::new((*db).clone());
        Self {
            inventory_repository,
            transaction_repository,
        }
    }

    /// Validate an "Add Item" submission and store it with its receipt
    pub async fn add_item(&self, command: AddItemCommand) -> Result<AddItemResult, ServiceError> {
        info!("Adding item {} (quantity {})", command.item_id, command.quantity);

        let item = Self::validate_add_item(&command)?;
        let transaction = match self.inventory_repository.store_item_with_receipt(&item).await? {
            ReceiptOutcome::Recorded(transaction) => transaction,
            ReceiptOutcome::BalanceOverflow { balance } => {
                warn!(
                    "Add item rejected for {}: receiving {} would overflow balance {}",
                    item.item_id, item.quantity, balance
                );
                return Err(ValidationError::BalanceOverflow {
                    item_id: item.item_id,
                    quantity: item.quantity,
                    balance,
                }
                .into());
            }
        };

        let success_message = format!(
            "Item {} added to inventory ({} received on {})",
            item.item_id, item.quantity, item.date_of_arrival
        );
        info!("{}", success_message);

        Ok(AddItemResult {
            item,
            transaction,
            success_message,
        })
    }

    fn validate_add_item(command: &AddItemCommand) -> Result<InventoryItem, ValidationError> {
        Ok(InventoryItem {
            item_id: require_identifier("Item ID", &command.item_id)?,
            item_name: command.item_name.trim().to_string(),
            quantity: require_non_negative_quantity(command.quantity)?,
            date_of_arrival: parse_date("Date of Arrival", &command.date_of_arrival)?,
            supplier_details: command.supplier_details.trim().to_string(),
        })
    }

    /// Take stock out of an existing item. The master row is left as is.
    pub async fn record_outbound(
        &self,
        command: RecordOutboundCommand,
    ) -> Result<RecordOutboundResult, ServiceError> {
        info!("Recording outbound of {} for item {}", command.quantity, command.item_id);

        let item_id = require_identifier("Item ID", &command.item_id)?;
        let quantity = require_non_negative_quantity(command.quantity)?;
        let transaction_date = parse_date("Transaction Date", &command.transaction_date)?;

        match self
            .transaction_repository
            .append_outbound(&item_id, quantity, transaction_date)
            .await?
        {
            OutboundOutcome::Recorded { transaction, balance } => {
                let success_message = format!(
                    "Removed {} of item {} ({} left on hand)",
                    quantity, item_id, balance
                );
                info!("{}", success_message);
                Ok(RecordOutboundResult {
                    transaction,
                    balance,
                    success_message,
                })
            }
            OutboundOutcome::UnknownItem => {
                warn!("Outbound rejected, unknown item {}", item_id);
                Err(ServiceError::not_found("Item", item_id))
            }
            OutboundOutcome::InsufficientStock { available } => {
                warn!(
                    "Outbound rejected for item {}: requested {}, available {}",
                    item_id, quantity, available
                );
                Err(ValidationError::InsufficientStock {
                    item_id,
                    requested: quantity,
                    available,
                }
                .into())
            }
        }
    }

    pub async fn get_item(&self, item_id: &str) -> Result<InventoryItem, ServiceError> {
        let item_id = item_id.trim();
        self.inventory_repository
            .get_item(item_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Item", item_id))
    }

    pub async fn list_items(&self) -> Result<Vec<InventoryItem>, ServiceError> {
        Ok(self.inventory_repository.list_items().await?)
    }

    /// Read the ledger, optionally for a single item
    pub async fn list_transactions(
        &self,
        query: TransactionListQuery,
    ) -> Result<Vec<InventoryTransaction>, ServiceError> {
        let transactions = match query.item_id.as_deref().map(str::trim) {
            Some(item_id) if !item_id.is_empty() => {
                self.transaction_repository.list_transactions_for_item(item_id).await?
            }
            _ => self.transaction_repository.list_transactions().await?,
        };
        Ok(transactions)
    }
}
