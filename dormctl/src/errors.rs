//! API-level error type and its wire mapping.
//!
//! Every failure leaves the service as `{"error": "<message>"}` with one of
//! three statuses: 400 for anything the client can fix (including conflicts),
//! 404 for missing resources, 500 for the rest. Messages are written for the
//! admin frontend; raw database detail stays in the logs.

use crate::db::errors::DbError;
use crate::db::handlers::settlements::AssignmentError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Request payload or parameters the client got wrong
    #[error("{message}")]
    BadRequest { message: String },

    /// A resource the client named does not exist
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: String, id: String },

    /// A business rule blocked the operation (already settled, room full)
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Persistence-layer failure, classified by [`DbError`]
    #[error(transparent)]
    Database(#[from] DbError),

    /// Anything else, with its context chain intact
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Wire message for a classified database error. Constraint and table names
/// pick the wording; unknown constraints get a generic line.
fn database_message(err: &DbError) -> String {
    match err {
        DbError::NotFound => "Resource not found".to_string(),
        DbError::UniqueViolation { constraint, table, .. } => match (table.as_deref(), constraint.as_deref()) {
            (Some("settlements"), _) => "Student is already settled or the room is occupied".to_string(),
            (Some("rooms"), Some(c)) if c.contains("room_number") => "A room with this number already exists".to_string(),
            _ => "Resource already exists".to_string(),
        },
        DbError::ForeignKeyViolation { constraint, .. } => match constraint.as_deref() {
            Some(c) if c.contains("student_id") => "Invalid student ID".to_string(),
            _ => "Invalid reference to related resource".to_string(),
        },
        DbError::CheckViolation { .. } => "Invalid data provided".to_string(),
        DbError::Other(_) => "Server error".to_string(),
    }
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Conflicts ship as 400: the frontend only distinguishes
            // 400/404/500
            Error::BadRequest { .. } | Error::Conflict { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } | Error::Database(DbError::NotFound) => StatusCode::NOT_FOUND,
            Error::Database(DbError::Other(_)) | Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// What the client is told. Never includes SQL, constraint names, or
    /// anything else from the database's own message.
    pub fn user_message(&self) -> String {
        match self {
            Error::BadRequest { message } | Error::Conflict { message } => message.clone(),
            Error::NotFound { resource, id } => {
                format!("{resource} with ID {id} not found")
            }
            Error::Database(db_err) => database_message(db_err),
            Error::Other(_) => "Server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Full detail goes to the log here; the body below only carries the
        // sanitized message
        match &self {
            Error::Database(DbError::Other(_)) | Error::Other(_) => {
                tracing::error!("Unhandled error: {:#}", self);
            }
            Error::Database(_) | Error::Conflict { .. } => {
                tracing::warn!("Constraint rejected request: {}", self);
            }
            Error::BadRequest { .. } | Error::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = self.status_code();
        let body = json!({ "error": self.user_message() });

        (status, axum::response::Json(body)).into_response()
    }
}

/// Room assignment failures, translated to the statuses the frontend expects:
/// both not-found cases are 400s on this endpoint (the reference is part of
/// the request body), and rule violations are conflicts.
impl From<AssignmentError> for Error {
    fn from(err: AssignmentError) -> Self {
        match err {
            AssignmentError::StudentNotFound(_) => Error::BadRequest {
                message: "Student with this ID not found".to_string(),
            },
            AssignmentError::AlreadySettled(_) => Error::Conflict {
                message: "Student is already settled in a room".to_string(),
            },
            AssignmentError::RoomNotFound(_) => Error::BadRequest {
                message: "Room with this number not found".to_string(),
            },
            AssignmentError::RoomFull(_) => Error::Conflict {
                message: "Room is already full".to_string(),
            },
            AssignmentError::Db(db_err) => Error::Database(db_err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
