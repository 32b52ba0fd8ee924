//! Read-only aggregate queries for dashboard statistics.

use crate::db::{errors::Result, models::statistics::StatisticsDBResponse};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Statistics<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Statistics<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), err)]
    pub async fn get(&mut self) -> Result<StatisticsDBResponse> {
        let total_students: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(&mut *self.db)
            .await?;
        let total_settlements: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settlements")
            .fetch_one(&mut *self.db)
            .await?;
        let total_payments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payments")
            .fetch_one(&mut *self.db)
            .await?;

        Ok(StatisticsDBResponse {
            total_students,
            total_settlements,
            total_payments,
        })
    }
}
