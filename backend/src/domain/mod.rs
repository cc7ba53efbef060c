//! # Domain Module
//!
//! Business rules for the back office: inventory intake and outbound
//! movements, the ledger balance engine, attendance and payments.
//!
//! Every intake operation validates the whole submission before touching
//! storage and returns an explicit `Result`: a success value carrying a
//! human-readable message, or a `ServiceError` saying why nothing was
//! written.
//!
//! ## Module Organization
//!
//! - **inventory_service**: "Add Item" intake, outbound movements, item and ledger reads
//! - **balance_service**: on-hand quantities derived from the ledger
//! - **attendance_service**: attendance intake and reads
//! - **payment_service**: payment intake and reads
//! - **signature_service**: signature image passthrough
//! - **validation**: field parsing shared by the intake services

pub mod attendance_service;
pub mod balance_service;
pub mod commands;
pub mod errors;
pub mod inventory_service;
pub mod models;
pub mod payment_service;
pub mod signature_service;
pub mod validation;

pub use attendance_service::*;
pub use balance_service::*;
pub use commands::*;
pub use errors::*;
pub use inventory_service::*;
pub use payment_service::*;
pub use signature_service::*;
