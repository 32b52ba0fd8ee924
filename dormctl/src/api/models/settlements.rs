//! API request/response models for settlements.

use crate::db::models::settlements::{SettlementCreateDBRequest, SettlementDetailDBResponse};
use crate::types::StudentId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Request models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettlementCreate {
    /// Student to assign
    pub student_id: StudentId,
    /// External room number; the internal room ID is resolved server-side
    pub room_number: String,
    /// Date the student moves in (ISO 8601 date)
    pub settle_date: NaiveDate,
}

// Response models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SettlementResponse {
    /// Settled student's ID
    pub student_id: StudentId,
    /// Settled student's full name
    pub full_name: String,
    /// Room number the student lives in
    pub room_number: String,
    /// Move-in date
    pub settle_date: NaiveDate,
}

impl From<SettlementCreate> for SettlementCreateDBRequest {
    fn from(request: SettlementCreate) -> Self {
        Self {
            student_id: request.student_id,
            room_number: request.room_number,
            settle_date: request.settle_date,
        }
    }
}

impl From<SettlementDetailDBResponse> for SettlementResponse {
    fn from(settlement: SettlementDetailDBResponse) -> Self {
        Self {
            student_id: settlement.student_id,
            full_name: settlement.full_name,
            room_number: settlement.room_number,
            settle_date: settlement.settle_date,
        }
    }
}
