//! HTTP handlers for settlement endpoints.

use crate::{
    AppState,
    api::models::{
        MutationResponse,
        settlements::{SettlementCreate, SettlementResponse},
    },
    db::{handlers::Settlements, models::settlements::SettlementCreateDBRequest},
    errors::{Error, Result},
    types::StudentId,
};
use axum::{
    extract::{Path, State},
    response::Json,
};

/// List all settlements
#[utoipa::path(
    get,
    path = "/settlements",
    tag = "settlements",
    summary = "List settlements",
    description = "All settlements with student names and room numbers, newest settle date first",
    responses(
        (status = 200, description = "All settlements", body = Vec<SettlementResponse>),
        (status = 500, description = "Server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_settlements(State(state): State<AppState>) -> Result<Json<Vec<SettlementResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Settlements::new(&mut pool_conn);

    let settlements = repo.list().await?;

    Ok(Json(settlements.into_iter().map(SettlementResponse::from).collect()))
}

/// Assign a student to a room
#[utoipa::path(
    post,
    path = "/settlements",
    tag = "settlements",
    summary = "Settle a student",
    description = "Assign a student to a room by room number, enforcing single occupancy and room capacity",
    request_body = SettlementCreate,
    responses(
        (status = 200, description = "Student settled", body = MutationResponse),
        (status = 400, description = "Student missing, already settled, room missing, or room full"),
        (status = 500, description = "Server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_settlement(State(state): State<AppState>, Json(data): Json<SettlementCreate>) -> Result<Json<MutationResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Settlements::new(&mut pool_conn);

    repo.assign(&SettlementCreateDBRequest::from(data)).await?;

    Ok(Json(MutationResponse::new("Student settled successfully")))
}

/// Evict a student from their room
#[utoipa::path(
    delete,
    path = "/settlements/student/{id}",
    tag = "settlements",
    summary = "Evict a student",
    params(
        ("id" = i64, Path, description = "Student ID"),
    ),
    responses(
        (status = 200, description = "Student evicted", body = MutationResponse),
        (status = 404, description = "No settlement for this student"),
        (status = 500, description = "Server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_settlement(State(state): State<AppState>, Path(id): Path<StudentId>) -> Result<Json<MutationResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Settlements::new(&mut pool_conn);

    let evicted = repo.evict(id).await?;
    if !evicted {
        return Err(Error::NotFound {
            resource: "Settlement for student".to_string(),
            id: id.to_string(),
        });
    }

    Ok(Json(MutationResponse::new("Student evicted successfully")))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{create_test_app, create_test_room, create_test_settlement, create_test_student};
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_settle_student_and_list(pool: PgPool) {
        create_test_room(&pool, "101", 2).await;
        let student = create_test_student(&pool, "Nadiia Franko").await;
        let server = create_test_app(pool).await;

        let response = server
            .post("/api/settlements")
            .json(&json!({
                "studentId": student.student_id,
                "roomNumber": "101",
                "settleDate": "2024-09-01"
            }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["message"], json!("Student settled successfully"));

        let listing = server.get("/api/settlements").await.json::<Value>();
        assert_eq!(
            listing,
            json!([{
                "student_id": student.student_id,
                "full_name": "Nadiia Franko",
                "room_number": "101",
                "settle_date": "2024-09-01"
            }])
        );
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_settle_unknown_student_is_400(pool: PgPool) {
        create_test_room(&pool, "101", 2).await;
        let server = create_test_app(pool).await;

        let response = server
            .post("/api/settlements")
            .json(&json!({"studentId": 424242, "roomNumber": "101", "settleDate": "2024-09-01"}))
            .await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"], json!("Student with this ID not found"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_settle_twice_is_400(pool: PgPool) {
        create_test_room(&pool, "101", 2).await;
        create_test_room(&pool, "102", 2).await;
        let student = create_test_student(&pool, "Settled Already").await;
        create_test_settlement(&pool, student.student_id, "101").await;
        let server = create_test_app(pool).await;

        let response = server
            .post("/api/settlements")
            .json(&json!({"studentId": student.student_id, "roomNumber": "102", "settleDate": "2024-09-01"}))
            .await;
        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["error"],
            json!("Student is already settled in a room")
        );
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_settle_into_unknown_room_is_400(pool: PgPool) {
        let student = create_test_student(&pool, "No Room").await;
        let server = create_test_app(pool).await;

        let response = server
            .post("/api/settlements")
            .json(&json!({"studentId": student.student_id, "roomNumber": "999", "settleDate": "2024-09-01"}))
            .await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"], json!("Room with this number not found"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_settle_full_room_is_400(pool: PgPool) {
        create_test_room(&pool, "101", 1).await;
        let resident = create_test_student(&pool, "Resident").await;
        let newcomer = create_test_student(&pool, "Newcomer").await;
        create_test_settlement(&pool, resident.student_id, "101").await;
        let server = create_test_app(pool).await;

        let response = server
            .post("/api/settlements")
            .json(&json!({"studentId": newcomer.student_id, "roomNumber": "101", "settleDate": "2024-09-02"}))
            .await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"], json!("Room is already full"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_evict_student(pool: PgPool) {
        create_test_room(&pool, "101", 2).await;
        let student = create_test_student(&pool, "Evictee").await;
        create_test_settlement(&pool, student.student_id, "101").await;
        let server = create_test_app(pool).await;

        let response = server.delete(&format!("/api/settlements/student/{}", student.student_id)).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["message"], json!("Student evicted successfully"));

        assert_eq!(server.get("/api/settlements").await.json::<Value>(), json!([]));

        // The student record itself survives eviction
        let students = server.get("/api/students").await.json::<Value>();
        assert_eq!(students.as_array().unwrap().len(), 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_evict_unsettled_student_is_404(pool: PgPool) {
        let student = create_test_student(&pool, "Never Settled").await;
        let server = create_test_app(pool).await;

        let response = server.delete(&format!("/api/settlements/student/{}", student.student_id)).await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(
            body["error"],
            json!(format!("Settlement for student with ID {} not found", student.student_id))
        );
    }
}
