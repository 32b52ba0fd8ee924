//! Common type definitions.
//!
//! All entity IDs are `BIGSERIAL` keys wrapped in type aliases for better
//! type safety at call sites:
//!
//! - [`StudentId`]: student identifier
//! - [`RoomId`]: internal room identifier (the external business key is the
//!   room number, see the rooms module)
//! - [`SettlementId`]: settlement identifier
//! - [`PaymentId`]: payment identifier

// Type aliases for IDs
pub type StudentId = i64;
pub type RoomId = i64;
pub type SettlementId = i64;
pub type PaymentId = i64;
