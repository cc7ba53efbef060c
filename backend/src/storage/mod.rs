//! # Storage Module
//!
//! SQLite persistence for the four record types: inventory master rows, the
//! inventory ledger, attendance and payments.
//!
//! `DbConnection` owns the pool; each repository holds a clone of it and
//! maps rows to domain models. Repositories report failures as
//! `anyhow::Error` with context and leave interpretation to the services.
//! Operations that touch more than one row run inside a single SQLite
//! transaction so a failure leaves the previous state intact.

pub mod connection;
pub mod repositories;

pub use connection::DbConnection;
pub use repositories::{
    AttendanceRepository,
    InventoryRepository,
    OutboundOutcome,
    PaymentRepository,
    ReceiptOutcome,
    TransactionRepository,
};
