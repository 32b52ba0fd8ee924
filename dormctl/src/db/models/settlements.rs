//! Database models for settlements (room assignments).

use crate::types::{RoomId, SettlementId, StudentId};
use chrono::NaiveDate;

/// Database request for assigning a student to a room.
///
/// Carries the external room number; the internal room_id is resolved by the
/// assignment service and never accepted from callers.
#[derive(Debug, Clone)]
pub struct SettlementCreateDBRequest {
    pub student_id: StudentId,
    pub room_number: String,
    pub settle_date: NaiveDate,
}

/// Database response for a settlement row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SettlementDBResponse {
    pub settlement_id: SettlementId,
    pub student_id: StudentId,
    pub room_id: RoomId,
    pub settle_date: NaiveDate,
}

/// Settlement joined with the student name and room number for listings
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SettlementDetailDBResponse {
    pub student_id: StudentId,
    pub full_name: String,
    pub room_number: String,
    pub settle_date: NaiveDate,
}
