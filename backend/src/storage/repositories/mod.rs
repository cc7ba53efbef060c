// Repository modules
pub mod attendance_repository;
pub mod inventory_repository;
pub mod payment_repository;
pub mod transaction_repository;

// Re-export repository types
pub use attendance_repository::AttendanceRepository;
pub use inventory_repository::{InventoryRepository, ReceiptOutcome};
pub use payment_repository::PaymentRepository;
pub use transaction_repository::{OutboundOutcome, TransactionRepository};
