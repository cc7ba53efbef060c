pub mod attendance_mapper;
pub mod inventory_mapper;
pub mod payment_mapper;
