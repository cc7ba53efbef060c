//! Domain entities persisted by the storage layer.

pub mod attendance;
pub mod inventory;
pub mod payment;
pub mod transaction;
