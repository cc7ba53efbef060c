//! Domain model for an inventory master row.
use chrono::NaiveDate;

/// Current-state row for one item, replaced wholesale on each "Add Item"
/// submission. `quantity` is the last declared quantity, not the balance.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    pub item_id: String,
    pub item_name: String,
    pub quantity: i64,
    pub date_of_arrival: NaiveDate,
    pub supplier_details: String,
}
