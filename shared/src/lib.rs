use serde::{Deserialize, Serialize};

/// Inventory master row as rendered in the inventory table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub item_id: String,
    pub item_name: String,
    /// Quantity declared on the most recent "Add Item" submission
    pub quantity: i64,
    /// Calendar date (YYYY-MM-DD)
    pub date_of_arrival: String,
    pub supplier_details: String,
}

/// Direction of an inventory movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    In,
    Out,
}

/// One row of the inventory ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryTransaction {
    pub transaction_id: i64,
    pub item_id: String,
    pub transaction_type: TransactionType,
    pub quantity: i64,
    /// Calendar date (YYYY-MM-DD)
    pub transaction_date: String,
}

/// Derived on-hand quantity for one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemBalance {
    pub item_id: String,
    pub item_name: String,
    pub balance: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddItemRequest {
    pub item_id: String,
    pub item_name: String,
    pub quantity: i64,
    /// Calendar date (YYYY-MM-DD)
    pub date_of_arrival: String,
    pub supplier_details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddItemResponse {
    pub item: InventoryItem,
    pub transaction: InventoryTransaction,
    pub success_message: String,
}

/// Removes stock from an item; the item id comes from the URL path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordOutboundRequest {
    pub quantity: i64,
    /// Calendar date (YYYY-MM-DD)
    pub transaction_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordOutboundResponse {
    pub transaction: InventoryTransaction,
    /// Balance after the movement was recorded
    pub balance: i64,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryListResponse {
    pub items: Vec<InventoryItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<InventoryTransaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceListResponse {
    pub balances: Vec<ItemBalance>,
}

/// Attendance row as rendered in the attendance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub worker_id: String,
    pub worker_name: String,
    /// Calendar date (YYYY-MM-DD)
    pub date: String,
    /// Wall clock time (HH:MM:SS)
    pub time_of_arrival: String,
    /// Wall clock time (HH:MM:SS), absent while the worker is still on site
    pub time_of_departure: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordAttendanceRequest {
    pub worker_id: String,
    pub worker_name: String,
    pub date: String,
    /// HH:MM or HH:MM:SS
    pub time_of_arrival: String,
    #[serde(default)]
    pub time_of_departure: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordAttendanceResponse {
    pub record: AttendanceRecord,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceListResponse {
    pub records: Vec<AttendanceRecord>,
}

/// Accepted ways of paying a worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    #[serde(rename = "Mobile Money")]
    MobileMoney,
}

/// Payment row as rendered in the payments table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub worker_id: String,
    pub worker_name: String,
    /// Calendar date (YYYY-MM-DD)
    pub payment_date: String,
    pub amount_paid: f64,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    pub worker_id: String,
    pub worker_name: String,
    pub payment_date: String,
    pub amount_paid: f64,
    /// One of the labels returned by `GET /api/payments/methods`
    pub payment_method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPaymentResponse {
    pub payment: PaymentRecord,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentListResponse {
    pub payments: Vec<PaymentRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodsResponse {
    pub methods: Vec<PaymentMethod>,
}

/// Category of a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
}

/// Body returned with every non-2xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable reason suitable for showing next to the form
    pub error: String,
    pub kind: ErrorKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payment_method_serializes_as_form_label() {
        let methods = vec![
            PaymentMethod::Cash,
            PaymentMethod::BankTransfer,
            PaymentMethod::MobileMoney,
        ];
        let value = serde_json::to_value(&methods).unwrap();
        assert_eq!(value, json!(["Cash", "Bank Transfer", "Mobile Money"]));

        let parsed: PaymentMethod = serde_json::from_value(json!("Mobile Money")).unwrap();
        assert_eq!(parsed, PaymentMethod::MobileMoney);
    }

    #[test]
    fn test_transaction_type_is_lowercase_on_the_wire() {
        let transaction = InventoryTransaction {
            transaction_id: 7,
            item_id: "SKU1".to_string(),
            transaction_type: TransactionType::Out,
            quantity: 3,
            transaction_date: "2024-01-02".to_string(),
        };

        let value = serde_json::to_value(&transaction).unwrap();
        assert_eq!(value["transaction_type"], "out");
        assert_eq!(value["transaction_id"], 7);
    }

    #[test]
    fn test_attendance_request_departure_is_optional() {
        let request: RecordAttendanceRequest = serde_json::from_value(json!({
            "worker_id": "W1",
            "worker_name": "Ada",
            "date": "2024-01-01",
            "time_of_arrival": "08:00"
        }))
        .unwrap();

        assert_eq!(request.time_of_departure, None);
    }

    #[test]
    fn test_error_kind_is_snake_case() {
        let body = ErrorResponse {
            error: "Item not found: SKU9".to_string(),
            kind: ErrorKind::NotFound,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["kind"], "not_found");
    }
}
