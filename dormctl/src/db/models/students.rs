//! Database models for students.

use crate::types::StudentId;
use chrono::NaiveDate;

/// Database request for creating a new student
#[derive(Debug, Clone)]
pub struct StudentCreateDBRequest {
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub phone: String,
    pub university_group: String,
    pub passport_number: String,
}

/// Database response for a student row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StudentDBResponse {
    pub student_id: StudentId,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub phone: String,
    pub university_group: String,
    pub passport_number: String,
}
