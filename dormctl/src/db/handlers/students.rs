//! Database repository for students.

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::students::{StudentCreateDBRequest, StudentDBResponse},
};
use crate::types::StudentId;
use sqlx::{Connection, PgConnection};
use tracing::instrument;

pub struct Students<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Students<'c> {
    type CreateRequest = StudentCreateDBRequest;
    type Response = StudentDBResponse;
    type Id = StudentId;

    #[instrument(skip(self, request), fields(full_name = %request.full_name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let student = sqlx::query_as::<_, StudentDBResponse>(
            r#"
            INSERT INTO students (full_name, birth_date, gender, phone, university_group, passport_number)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING student_id, full_name, birth_date, gender, phone, university_group, passport_number
            "#,
        )
        .bind(&request.full_name)
        .bind(request.birth_date)
        .bind(&request.gender)
        .bind(&request.phone)
        .bind(&request.university_group)
        .bind(&request.passport_number)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(student)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let student = sqlx::query_as::<_, StudentDBResponse>(
            "SELECT student_id, full_name, birth_date, gender, phone, university_group, passport_number
             FROM students WHERE student_id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(student)
    }

    #[instrument(skip(self), err)]
    async fn list(&mut self) -> Result<Vec<Self::Response>> {
        let students = sqlx::query_as::<_, StudentDBResponse>(
            "SELECT student_id, full_name, birth_date, gender, phone, university_group, passport_number
             FROM students ORDER BY student_id",
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(students)
    }

    /// Delete a student together with their settlement and payment history.
    ///
    /// The dependent rows go first so the student row never violates its
    /// foreign keys mid-delete, and all three statements share one
    /// transaction: either the student disappears entirely or nothing does.
    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM settlements WHERE student_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM payments WHERE student_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM students WHERE student_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}

impl<'c> Students<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}
