//! Database models for rooms.

use crate::types::RoomId;

/// Database request for creating a new room
#[derive(Debug, Clone)]
pub struct RoomCreateDBRequest {
    pub room_number: String,
    pub capacity: i32,
}

/// Database response for a room row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoomDBResponse {
    pub room_id: RoomId,
    pub room_number: String,
    pub capacity: i32,
}

/// Room row annotated with occupancy, as produced by the availability query.
///
/// `occupied_count` comes from an outer join against settlements, so rooms
/// with no occupants report 0 rather than dropping out of the join.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AvailableRoomDBResponse {
    pub room_id: RoomId,
    pub room_number: String,
    pub capacity: i32,
    pub occupied_count: i64,
    pub available_spots: i64,
}
