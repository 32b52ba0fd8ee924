//! API request/response models for payments.

use crate::db::models::payments::{PaymentCreateDBRequest, PaymentDBResponse, StudentPaymentDBResponse};
use crate::types::{PaymentId, StudentId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Request models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreate {
    /// Paying student's ID
    pub student_id: StudentId,
    /// Date of the payment (ISO 8601 date)
    pub payment_date: NaiveDate,
    /// Amount paid (accepts a JSON number or string; returned as string to preserve precision)
    #[schema(value_type = String)]
    pub amount: Decimal,
    /// Payment method ("cash", "card", ...)
    pub payment_method: String,
}

// Response models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    /// Payment ID
    pub payment_id: PaymentId,
    /// Paying student's ID
    pub student_id: StudentId,
    /// Date of the payment
    pub payment_date: NaiveDate,
    /// Amount paid (returned as string to preserve precision)
    #[schema(value_type = String)]
    pub amount: Decimal,
    /// Payment method
    pub payment_method: String,
}

/// Payment row in a single student's history
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentPaymentResponse {
    /// Date of the payment
    pub payment_date: NaiveDate,
    /// Amount paid (returned as string to preserve precision)
    #[schema(value_type = String)]
    pub amount: Decimal,
    /// Payment method
    pub payment_method: String,
}

impl From<PaymentCreate> for PaymentCreateDBRequest {
    fn from(request: PaymentCreate) -> Self {
        Self {
            student_id: request.student_id,
            payment_date: request.payment_date,
            amount: request.amount,
            payment_method: request.payment_method,
        }
    }
}

impl From<PaymentDBResponse> for PaymentResponse {
    fn from(payment: PaymentDBResponse) -> Self {
        Self {
            payment_id: payment.payment_id,
            student_id: payment.student_id,
            payment_date: payment.payment_date,
            amount: payment.amount,
            payment_method: payment.payment_method,
        }
    }
}

impl From<StudentPaymentDBResponse> for StudentPaymentResponse {
    fn from(payment: StudentPaymentDBResponse) -> Self {
        Self {
            payment_date: payment.payment_date,
            amount: payment.amount,
            payment_method: payment.payment_method,
        }
    }
}
