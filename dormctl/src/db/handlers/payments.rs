//! Database repository for payments.

use crate::db::{
    errors::Result,
    models::payments::{PaymentCreateDBRequest, PaymentDBResponse, StudentPaymentDBResponse},
};
use crate::types::StudentId;
use sqlx::PgConnection;
use tracing::instrument;

pub struct Payments<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Payments<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Record a payment. The only validation is what the schema enforces;
    /// a nonexistent student surfaces as a foreign key violation.
    #[instrument(skip(self, request), fields(student_id = request.student_id, amount = %request.amount), err)]
    pub async fn create(&mut self, request: &PaymentCreateDBRequest) -> Result<PaymentDBResponse> {
        let payment = sqlx::query_as::<_, PaymentDBResponse>(
            "INSERT INTO payments (student_id, payment_date, amount, payment_method)
             VALUES ($1, $2, $3, $4)
             RETURNING payment_id, student_id, payment_date, amount, payment_method",
        )
        .bind(request.student_id)
        .bind(request.payment_date)
        .bind(request.amount)
        .bind(&request.payment_method)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(payment)
    }

    /// All payments, newest payment date first.
    #[instrument(skip(self), err)]
    pub async fn list_all(&mut self) -> Result<Vec<PaymentDBResponse>> {
        let payments = sqlx::query_as::<_, PaymentDBResponse>(
            "SELECT payment_id, student_id, payment_date, amount, payment_method
             FROM payments ORDER BY payment_date DESC",
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(payments)
    }

    /// One student's payment history in chronological order.
    #[instrument(skip(self), err)]
    pub async fn list_for_student(&mut self, student_id: StudentId) -> Result<Vec<StudentPaymentDBResponse>> {
        let payments = sqlx::query_as::<_, StudentPaymentDBResponse>(
            "SELECT payment_date, amount, payment_method
             FROM payments WHERE student_id = $1 ORDER BY payment_date ASC",
        )
        .bind(student_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(payments)
    }
}
