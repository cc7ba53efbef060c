use crate::domain::balance_service::ItemBalance as DomainItemBalance;
use crate::domain::commands::inventory::{AddItemCommand, RecordOutboundCommand};
use crate::domain::models::inventory::InventoryItem as DomainInventoryItem;
use crate::domain::models::transaction::{
    InventoryTransaction as DomainInventoryTransaction, TransactionType as DomainTransactionType,
};
use shared::{
    AddItemRequest, InventoryItem as SharedInventoryItem,
    InventoryTransaction as SharedInventoryTransaction, ItemBalance as SharedItemBalance,
    RecordOutboundRequest, TransactionType as SharedTransactionType,
};

pub struct InventoryMapper;

impl InventoryMapper {
    pub fn to_add_item_command(dto: AddItemRequest) -> AddItemCommand {
        AddItemCommand {
            item_id: dto.item_id,
            item_name: dto.item_name,
            quantity: dto.quantity,
            date_of_arrival: dto.date_of_arrival,
            supplier_details: dto.supplier_details,
        }
    }

    pub fn to_outbound_command(item_id: String, dto: RecordOutboundRequest) -> RecordOutboundCommand {
        RecordOutboundCommand {
            item_id,
            quantity: dto.quantity,
            transaction_date: dto.transaction_date,
        }
    }

    pub fn item_to_dto(domain: DomainInventoryItem) -> SharedInventoryItem {
        SharedInventoryItem {
            item_id: domain.item_id,
            item_name: domain.item_name,
            quantity: domain.quantity,
            date_of_arrival: domain.date_of_arrival.format("%Y-%m-%d").to_string(),
            supplier_details: domain.supplier_details,
        }
    }

    pub fn transaction_to_dto(domain: DomainInventoryTransaction) -> SharedInventoryTransaction {
        SharedInventoryTransaction {
            transaction_id: domain.transaction_id,
            item_id: domain.item_id,
            transaction_type: Self::to_dto_type(domain.transaction_type),
            quantity: domain.quantity,
            transaction_date: domain.transaction_date.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn balance_to_dto(domain: DomainItemBalance) -> SharedItemBalance {
        SharedItemBalance {
            item_id: domain.item_id,
            item_name: domain.item_name,
            balance: domain.balance,
        }
    }

    fn to_dto_type(domain_type: DomainTransactionType) -> SharedTransactionType {
        match domain_type {
            DomainTransactionType::In => SharedTransactionType::In,
            DomainTransactionType::Out => SharedTransactionType::Out,
        }
    }
}
