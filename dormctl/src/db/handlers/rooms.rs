//! Database repository for rooms.
//!
//! Rooms are immutable once created: there is no update or delete path, so
//! this repository stays off the [`Repository`](super::repository::Repository)
//! trait and only exposes what the room inventory actually needs.

use crate::db::{
    errors::Result,
    models::rooms::{AvailableRoomDBResponse, RoomCreateDBRequest, RoomDBResponse},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Rooms<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Rooms<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(room_number = %request.room_number), err)]
    pub async fn create(&mut self, request: &RoomCreateDBRequest) -> Result<RoomDBResponse> {
        let room = sqlx::query_as::<_, RoomDBResponse>(
            "INSERT INTO rooms (room_number, capacity) VALUES ($1, $2)
             RETURNING room_id, room_number, capacity",
        )
        .bind(&request.room_number)
        .bind(request.capacity)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(room)
    }

    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<RoomDBResponse>> {
        let rooms = sqlx::query_as::<_, RoomDBResponse>("SELECT room_id, room_number, capacity FROM rooms ORDER BY room_id")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(rooms)
    }

    /// List rooms that still have free spots, annotated with occupancy.
    ///
    /// Occupant counts come from an outer join against settlements grouped by
    /// room, so rooms nobody lives in yet count as 0 instead of vanishing
    /// from the result.
    #[instrument(skip(self), err)]
    pub async fn list_available(&mut self) -> Result<Vec<AvailableRoomDBResponse>> {
        let rooms = sqlx::query_as::<_, AvailableRoomDBResponse>(
            r#"
            SELECT r.room_id, r.room_number, r.capacity,
                   COALESCE(o.occupied, 0) AS occupied_count,
                   r.capacity - COALESCE(o.occupied, 0) AS available_spots
            FROM rooms r
            LEFT JOIN (
                SELECT room_id, COUNT(*) AS occupied
                FROM settlements
                GROUP BY room_id
            ) o ON o.room_id = r.room_id
            WHERE r.capacity - COALESCE(o.occupied, 0) > 0
            ORDER BY r.room_number
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rooms)
    }
}
