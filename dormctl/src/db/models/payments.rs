//! Database models for payments.

use crate::types::{PaymentId, StudentId};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Database request for recording a new payment
#[derive(Debug, Clone)]
pub struct PaymentCreateDBRequest {
    pub student_id: StudentId,
    pub payment_date: NaiveDate,
    pub amount: Decimal,
    pub payment_method: String,
}

/// Database response for a payment row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PaymentDBResponse {
    pub payment_id: PaymentId,
    pub student_id: StudentId,
    pub payment_date: NaiveDate,
    pub amount: Decimal,
    pub payment_method: String,
}

/// Payment row scoped to a single student's history (no redundant student_id)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StudentPaymentDBResponse {
    pub payment_date: NaiveDate,
    pub amount: Decimal,
    pub payment_method: String,
}
