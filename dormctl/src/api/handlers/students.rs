//! HTTP handlers for student endpoints.

use crate::{
    AppState,
    api::models::{
        MutationResponse,
        students::{StudentCreate, StudentCreatedResponse, StudentResponse},
    },
    db::{handlers::Students, handlers::repository::Repository, models::students::StudentCreateDBRequest},
    errors::{Error, Result},
    types::StudentId,
};
use axum::{
    extract::{Path, State},
    response::Json,
};

/// List all students
#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    summary = "List students",
    description = "List all registered students in creation order",
    responses(
        (status = 200, description = "All students", body = Vec<StudentResponse>),
        (status = 500, description = "Server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<StudentResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Students::new(&mut pool_conn);

    let students = repo.list().await?;

    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

/// Register a new student
#[utoipa::path(
    post,
    path = "/students",
    tag = "students",
    summary = "Add a student",
    request_body = StudentCreate,
    responses(
        (status = 200, description = "Student added", body = StudentCreatedResponse),
        (status = 500, description = "Server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_student(State(state): State<AppState>, Json(data): Json<StudentCreate>) -> Result<Json<StudentCreatedResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Students::new(&mut pool_conn);

    let db_request = StudentCreateDBRequest {
        full_name: data.name,
        birth_date: data.birth_date,
        gender: data.gender,
        phone: data.phone,
        university_group: data.group,
        passport_number: data.passport,
    };

    let student = repo.create(&db_request).await?;

    Ok(Json(StudentCreatedResponse {
        success: true,
        message: "Student added successfully".to_string(),
        student_id: student.student_id,
    }))
}

/// Delete a student and everything attached to them
#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "students",
    summary = "Delete a student",
    description = "Delete a student together with their settlement and payment records, atomically",
    params(
        ("id" = i64, Path, description = "Student ID"),
    ),
    responses(
        (status = 200, description = "Student and related records deleted", body = MutationResponse),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_student(State(state): State<AppState>, Path(id): Path<StudentId>) -> Result<Json<MutationResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Students::new(&mut pool_conn);

    let deleted = repo.delete(id).await?;
    if !deleted {
        return Err(Error::NotFound {
            resource: "Student".to_string(),
            id: id.to_string(),
        });
    }

    Ok(Json(MutationResponse::new("Student and all related records deleted")))
}
