//! API request/response models for students.

use crate::db::models::students::StudentDBResponse;
use crate::types::StudentId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Request models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentCreate {
    /// Full name of the student
    pub name: String,
    /// Date of birth (ISO 8601 date)
    pub birth_date: NaiveDate,
    /// Gender
    pub gender: String,
    /// Contact phone number
    pub phone: String,
    /// University group code
    pub group: String,
    /// Passport number
    pub passport: String,
}

// Response models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
    /// Student ID
    pub student_id: StudentId,
    /// Full name
    pub full_name: String,
    /// Date of birth
    pub birth_date: NaiveDate,
    /// Gender
    pub gender: String,
    /// Contact phone number
    pub phone: String,
    /// University group code
    pub university_group: String,
    /// Passport number
    pub passport_number: String,
}

/// Acknowledgement for a created student, echoing the generated ID
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentCreatedResponse {
    pub success: bool,
    pub message: String,
    /// ID assigned to the new student
    pub student_id: StudentId,
}

impl From<StudentDBResponse> for StudentResponse {
    fn from(student: StudentDBResponse) -> Self {
        Self {
            student_id: student.student_id,
            full_name: student.full_name,
            birth_date: student.birth_date,
            gender: student.gender,
            phone: student.phone,
            university_group: student.university_group,
            passport_number: student.passport_number,
        }
    }
}
