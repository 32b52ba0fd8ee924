//! Aggregate counts for the dashboard statistics endpoint.

/// Row counts across the three dormitory tables
#[derive(Debug, Clone, Copy)]
pub struct StatisticsDBResponse {
    pub total_students: i64,
    pub total_settlements: i64,
    pub total_payments: i64,
}
