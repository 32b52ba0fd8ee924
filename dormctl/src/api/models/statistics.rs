//! API response model for dashboard statistics.

use crate::db::models::statistics::StatisticsDBResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    /// Number of registered students
    pub total_students: i64,
    /// Number of active settlements
    pub total_settlements: i64,
    /// Number of recorded payments
    pub total_payments: i64,
}

impl From<StatisticsDBResponse> for StatisticsResponse {
    fn from(stats: StatisticsDBResponse) -> Self {
        Self {
            total_students: stats.total_students,
            total_settlements: stats.total_settlements,
            total_payments: stats.total_payments,
        }
    }
}
