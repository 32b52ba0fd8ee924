//! Database repository for settlements (room assignments).
//!
//! `assign` is the settlement service: it owns the precondition checks, the
//! room lock, and the insert, all inside one transaction.

use crate::db::{
    errors::{DbError, Result},
    models::settlements::{SettlementCreateDBRequest, SettlementDBResponse, SettlementDetailDBResponse},
};
use crate::types::{RoomId, StudentId};
use sqlx::{Connection, PgConnection};
use thiserror::Error;
use tracing::instrument;

/// Why an assignment was refused.
///
/// When several preconditions fail at once, the first failing check in the
/// fixed order below wins. Constraint violations that slip past the checks
/// (a concurrent duplicate settlement, a student deleted mid-flight) come
/// back through the `Db` variant and are classified by the caller.
#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("student {0} does not exist")]
    StudentNotFound(StudentId),
    #[error("student {0} is already settled in a room")]
    AlreadySettled(StudentId),
    #[error("room with number {0} does not exist")]
    RoomNotFound(String),
    #[error("room {0} is fully occupied")]
    RoomFull(String),
    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<sqlx::Error> for AssignmentError {
    fn from(err: sqlx::Error) -> Self {
        AssignmentError::Db(DbError::from(err))
    }
}

pub struct Settlements<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Settlements<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Assign a student to a room by its external room number.
    ///
    /// Checks run in a fixed order: the student must exist, must not already
    /// be settled, the room must exist, and the room must have a free spot.
    /// The room row is locked with `SELECT ... FOR UPDATE` before the
    /// occupancy count, so concurrent assignments to the same room serialize
    /// and the capacity check stays accurate. The whole sequence shares one
    /// transaction; any failed check rolls it back untouched. The UNIQUE
    /// constraint on `settlements.student_id` backstops the one-room-per-
    /// student rule against writers that bypass this path.
    #[instrument(
        skip(self, request),
        fields(student_id = request.student_id, room_number = %request.room_number),
        err
    )]
    pub async fn assign(&mut self, request: &SettlementCreateDBRequest) -> std::result::Result<SettlementDBResponse, AssignmentError> {
        let mut tx = self.db.begin().await.map_err(DbError::from)?;

        let student_exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM students WHERE student_id = $1)")
            .bind(request.student_id)
            .fetch_one(&mut *tx)
            .await?;
        if !student_exists {
            return Err(AssignmentError::StudentNotFound(request.student_id));
        }

        let existing: Option<i64> = sqlx::query_scalar("SELECT settlement_id FROM settlements WHERE student_id = $1")
            .bind(request.student_id)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_some() {
            return Err(AssignmentError::AlreadySettled(request.student_id));
        }

        // Lock the room row for the rest of the transaction
        let room: Option<(RoomId, i32)> = sqlx::query_as("SELECT room_id, capacity FROM rooms WHERE room_number = $1 FOR UPDATE")
            .bind(&request.room_number)
            .fetch_optional(&mut *tx)
            .await?;
        let Some((room_id, capacity)) = room else {
            return Err(AssignmentError::RoomNotFound(request.room_number.clone()));
        };

        let occupied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settlements WHERE room_id = $1")
            .bind(room_id)
            .fetch_one(&mut *tx)
            .await?;
        if occupied >= i64::from(capacity) {
            return Err(AssignmentError::RoomFull(request.room_number.clone()));
        }

        let settlement = sqlx::query_as::<_, SettlementDBResponse>(
            "INSERT INTO settlements (student_id, room_id, settle_date)
             VALUES ($1, $2, $3)
             RETURNING settlement_id, student_id, room_id, settle_date",
        )
        .bind(request.student_id)
        .bind(room_id)
        .bind(request.settle_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await.map_err(DbError::from)?;

        Ok(settlement)
    }

    /// Evict a student from their room. Returns false when the student had
    /// no settlement to remove.
    #[instrument(skip(self), err)]
    pub async fn evict(&mut self, student_id: StudentId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM settlements WHERE student_id = $1")
            .bind(student_id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List settlements joined with student names and room numbers, newest
    /// settle date first.
    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<SettlementDetailDBResponse>> {
        let settlements = sqlx::query_as::<_, SettlementDetailDBResponse>(
            r#"
            SELECT s.student_id, st.full_name, r.room_number, s.settle_date
            FROM settlements s
            JOIN students st ON st.student_id = s.student_id
            JOIN rooms r ON r.room_id = s.room_id
            ORDER BY s.settle_date DESC
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(settlements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_room, create_test_settlement, create_test_student};
    use chrono::NaiveDate;
    use sqlx::PgPool;

    fn assignment(student_id: StudentId, room_number: &str) -> SettlementCreateDBRequest {
        SettlementCreateDBRequest {
            student_id,
            room_number: room_number.to_string(),
            settle_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_assign_settles_student(pool: PgPool) {
        let room = create_test_room(&pool, "101", 2).await;
        let student = create_test_student(&pool, "Settler").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Settlements::new(&mut conn);
        let settlement = repo.assign(&assignment(student.student_id, "101")).await.unwrap();

        assert_eq!(settlement.student_id, student.student_id);
        assert_eq!(settlement.room_id, room.room_id);
        assert_eq!(settlement.settle_date, NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_assign_rejects_missing_student(pool: PgPool) {
        create_test_room(&pool, "101", 2).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Settlements::new(&mut conn);
        let result = repo.assign(&assignment(424_242, "101")).await;

        assert!(matches!(result, Err(AssignmentError::StudentNotFound(424_242))));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_assign_rejects_already_settled_student(pool: PgPool) {
        create_test_room(&pool, "101", 2).await;
        create_test_room(&pool, "102", 2).await;
        let student = create_test_student(&pool, "Mover").await;
        create_test_settlement(&pool, student.student_id, "101").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Settlements::new(&mut conn);
        let result = repo.assign(&assignment(student.student_id, "102")).await;

        assert!(matches!(result, Err(AssignmentError::AlreadySettled(id)) if id == student.student_id));

        // The rejected attempt must not leave a second settlement behind
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settlements WHERE student_id = $1")
            .bind(student.student_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_assign_rejects_unknown_room(pool: PgPool) {
        let student = create_test_student(&pool, "Homeless").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Settlements::new(&mut conn);
        let result = repo.assign(&assignment(student.student_id, "999")).await;

        assert!(matches!(result, Err(AssignmentError::RoomNotFound(ref n)) if n == "999"));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settlements")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_assign_fills_room_to_capacity_and_no_further(pool: PgPool) {
        create_test_room(&pool, "101", 2).await;
        let a = create_test_student(&pool, "Student A").await;
        let b = create_test_student(&pool, "Student B").await;
        let c = create_test_student(&pool, "Student C").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Settlements::new(&mut conn);

        repo.assign(&assignment(a.student_id, "101")).await.unwrap();
        repo.assign(&assignment(b.student_id, "101")).await.unwrap();

        let result = repo.assign(&assignment(c.student_id, "101")).await;
        assert!(matches!(result, Err(AssignmentError::RoomFull(ref n)) if n == "101"));

        let occupants: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settlements")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(occupants, 2);
    }

    /// Missing student wins over missing room when both checks would fail.
    #[sqlx::test]
    #[test_log::test]
    async fn test_assign_failure_order_student_before_room(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Settlements::new(&mut conn);

        let result = repo.assign(&assignment(424_242, "999")).await;
        assert!(matches!(result, Err(AssignmentError::StudentNotFound(424_242))));
    }

    /// Two writers racing for the last spot in a room must serialize on the
    /// room lock; exactly one wins.
    #[sqlx::test]
    #[test_log::test]
    async fn test_concurrent_assignments_cannot_overfill_room(pool: PgPool) {
        create_test_room(&pool, "101", 1).await;
        let a = create_test_student(&pool, "Racer A").await;
        let b = create_test_student(&pool, "Racer B").await;

        let pool_a = pool.clone();
        let pool_b = pool.clone();
        let task_a = tokio::spawn(async move {
            let mut conn = pool_a.acquire().await.unwrap();
            let mut repo = Settlements::new(&mut conn);
            repo.assign(&assignment(a.student_id, "101")).await
        });
        let task_b = tokio::spawn(async move {
            let mut conn = pool_b.acquire().await.unwrap();
            let mut repo = Settlements::new(&mut conn);
            repo.assign(&assignment(b.student_id, "101")).await
        });

        let results = [task_a.await.unwrap(), task_b.await.unwrap()];
        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);

        let occupants: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settlements")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(occupants, 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_evict_removes_settlement(pool: PgPool) {
        create_test_room(&pool, "101", 2).await;
        let student = create_test_student(&pool, "Leaver").await;
        create_test_settlement(&pool, student.student_id, "101").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Settlements::new(&mut conn);

        assert!(repo.evict(student.student_id).await.unwrap());
        // Second eviction finds nothing
        assert!(!repo.evict(student.student_id).await.unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_orders_by_settle_date_desc(pool: PgPool) {
        create_test_room(&pool, "101", 3).await;
        let early = create_test_student(&pool, "Early Bird").await;
        let late = create_test_student(&pool, "Late Comer").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Settlements::new(&mut conn);
        repo.assign(&SettlementCreateDBRequest {
            student_id: early.student_id,
            room_number: "101".to_string(),
            settle_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
        })
        .await
        .unwrap();
        repo.assign(&SettlementCreateDBRequest {
            student_id: late.student_id,
            room_number: "101".to_string(),
            settle_date: NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
        })
        .await
        .unwrap();

        let settlements = repo.list().await.unwrap();
        assert_eq!(settlements.len(), 2);
        assert_eq!(settlements[0].full_name, "Late Comer");
        assert_eq!(settlements[0].room_number, "101");
        assert_eq!(settlements[1].full_name, "Early Bird");
    }
}
