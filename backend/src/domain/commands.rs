//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined in
//! the `shared` crate to these internal types. Field values arrive exactly as
//! typed into the form; the services validate and parse them.

pub mod inventory {
    use crate::domain::models::inventory::InventoryItem;
    use crate::domain::models::transaction::InventoryTransaction;

    /// Input for the "Add Item" form.
    #[derive(Debug, Clone)]
    pub struct AddItemCommand {
        pub item_id: String,
        pub item_name: String,
        pub quantity: i64,
        pub date_of_arrival: String,
        pub supplier_details: String,
    }

    /// Input for taking stock out of an item.
    #[derive(Debug, Clone)]
    pub struct RecordOutboundCommand {
        pub item_id: String,
        pub quantity: i64,
        pub transaction_date: String,
    }

    /// Filter for reading the ledger.
    #[derive(Debug, Clone, Default)]
    pub struct TransactionListQuery {
        pub item_id: Option<String>,
    }

    /// Result of adding an item.
    #[derive(Debug, Clone)]
    pub struct AddItemResult {
        pub item: InventoryItem,
        pub transaction: InventoryTransaction,
        pub success_message: String,
    }

    /// Result of an outbound movement.
    #[derive(Debug, Clone)]
    pub struct RecordOutboundResult {
        pub transaction: InventoryTransaction,
        pub balance: i64,
        pub success_message: String,
    }
}

pub mod attendance {
    use crate::domain::models::attendance::AttendanceRecord;

    /// Input for the "Record Attendance" form.
    #[derive(Debug, Clone)]
    pub struct RecordAttendanceCommand {
        pub worker_id: String,
        pub worker_name: String,
        pub date: String,
        pub time_of_arrival: String,
        pub time_of_departure: Option<String>,
    }

    /// Result of recording attendance.
    #[derive(Debug, Clone)]
    pub struct RecordAttendanceResult {
        pub record: AttendanceRecord,
        pub success_message: String,
    }
}

pub mod payment {
    use crate::domain::models::payment::PaymentRecord;

    /// Input for the "Record Payment" form.
    #[derive(Debug, Clone)]
    pub struct RecordPaymentCommand {
        pub worker_id: String,
        pub worker_name: String,
        pub payment_date: String,
        pub amount_paid: f64,
        pub payment_method: String,
    }

    /// Filter for reading payments.
    #[derive(Debug, Clone, Default)]
    pub struct PaymentListQuery {
        pub worker_id: Option<String>,
    }

    /// Result of recording a payment.
    #[derive(Debug, Clone)]
    pub struct RecordPaymentResult {
        pub payment: PaymentRecord,
        pub success_message: String,
    }
}
