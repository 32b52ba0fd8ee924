//! HTTP handlers for payment endpoints.

use crate::{
    AppState,
    api::models::{
        MutationResponse,
        payments::{PaymentCreate, PaymentResponse, StudentPaymentResponse},
    },
    db::{handlers::Payments, models::payments::PaymentCreateDBRequest},
    errors::{Error, Result},
    types::StudentId,
};
use axum::{
    extract::{Path, State},
    response::Json,
};

/// List all payments
#[utoipa::path(
    get,
    path = "/payments",
    tag = "payments",
    summary = "List payments",
    description = "All payments, newest payment date first",
    responses(
        (status = 200, description = "All payments", body = Vec<PaymentResponse>),
        (status = 500, description = "Server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_payments(State(state): State<AppState>) -> Result<Json<Vec<PaymentResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Payments::new(&mut pool_conn);

    let payments = repo.list_all().await?;

    Ok(Json(payments.into_iter().map(PaymentResponse::from).collect()))
}

/// List one student's payments
#[utoipa::path(
    get,
    path = "/payments/student/{id}",
    tag = "payments",
    summary = "List a student's payments",
    description = "One student's payment history in chronological order",
    params(
        ("id" = i64, Path, description = "Student ID"),
    ),
    responses(
        (status = 200, description = "The student's payments", body = Vec<StudentPaymentResponse>),
        (status = 500, description = "Server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_student_payments(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<Json<Vec<StudentPaymentResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Payments::new(&mut pool_conn);

    let payments = repo.list_for_student(id).await?;

    Ok(Json(payments.into_iter().map(StudentPaymentResponse::from).collect()))
}

/// Record a payment
#[utoipa::path(
    post,
    path = "/payments",
    tag = "payments",
    summary = "Add a payment",
    request_body = PaymentCreate,
    responses(
        (status = 200, description = "Payment recorded", body = MutationResponse),
        (status = 400, description = "Invalid student ID"),
        (status = 500, description = "Server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_payment(State(state): State<AppState>, Json(data): Json<PaymentCreate>) -> Result<Json<MutationResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Payments::new(&mut pool_conn);

    repo.create(&PaymentCreateDBRequest::from(data)).await?;

    Ok(Json(MutationResponse::new("Payment added successfully")))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{create_test_app, create_test_student};
    use serde_json::{Value, json};
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_add_payment_and_list(pool: PgPool) {
        let student = create_test_student(&pool, "Payer").await;
        let server = create_test_app(pool).await;

        let response = server
            .post("/api/payments")
            .json(&json!({
                "studentId": student.student_id,
                "paymentDate": "2024-09-05",
                "amount": 500,
                "paymentMethod": "cash"
            }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["message"], json!("Payment added successfully"));

        let listing = server.get("/api/payments").await.json::<Value>();
        assert_eq!(listing.as_array().unwrap().len(), 1);
        assert_eq!(listing[0]["student_id"], json!(student.student_id));
        assert_eq!(listing[0]["payment_date"], json!("2024-09-05"));
        // Amounts serialize as strings, with the scale the schema stores
        assert_eq!(listing[0]["amount"], json!("500.00"));
        assert_eq!(listing[0]["payment_method"], json!("cash"));
        assert!(listing[0]["payment_id"].is_i64());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_payment_for_unknown_student_is_400(pool: PgPool) {
        let server = create_test_app(pool).await;

        let response = server
            .post("/api/payments")
            .json(&json!({
                "studentId": 424242,
                "paymentDate": "2024-09-05",
                "amount": "100.00",
                "paymentMethod": "card"
            }))
            .await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"], json!("Invalid student ID"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_global_listing_desc_student_history_asc(pool: PgPool) {
        let student = create_test_student(&pool, "Regular Payer").await;
        let server = create_test_app(pool).await;

        for (date, amount) in [("2024-09-01", "100.00"), ("2024-11-01", "300.00"), ("2024-10-01", "200.00")] {
            server
                .post("/api/payments")
                .json(&json!({
                    "studentId": student.student_id,
                    "paymentDate": date,
                    "amount": amount,
                    "paymentMethod": "card"
                }))
                .await
                .assert_status_ok();
        }

        let global = server.get("/api/payments").await.json::<Value>();
        let dates: Vec<&str> = global
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["payment_date"].as_str().unwrap())
            .collect();
        assert_eq!(dates, vec!["2024-11-01", "2024-10-01", "2024-09-01"]);

        let history = server
            .get(&format!("/api/payments/student/{}", student.student_id))
            .await
            .json::<Value>();
        let dates: Vec<&str> = history
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["payment_date"].as_str().unwrap())
            .collect();
        assert_eq!(dates, vec!["2024-09-01", "2024-10-01", "2024-11-01"]);
        // Per-student rows carry no redundant student_id
        assert!(history[0].get("student_id").is_none());
    }
}
