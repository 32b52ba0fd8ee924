//! API response models for rooms.
//!
//! Rooms have no creation or update requests: the inventory is seeded from
//! configuration at startup.

use crate::db::models::rooms::{AvailableRoomDBResponse, RoomDBResponse};
use crate::types::RoomId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoomResponse {
    /// Internal room ID
    pub room_id: RoomId,
    /// External room number (the business key used for assignments)
    pub room_number: String,
    /// Maximum number of occupants
    pub capacity: i32,
}

/// Room with free spots, annotated with occupancy
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AvailableRoomResponse {
    /// Internal room ID
    pub room_id: RoomId,
    /// External room number
    pub room_number: String,
    /// Maximum number of occupants
    pub capacity: i32,
    /// Current number of settled students
    pub occupied_count: i64,
    /// Remaining free spots (capacity minus occupied_count)
    pub available_spots: i64,
}

impl From<RoomDBResponse> for RoomResponse {
    fn from(room: RoomDBResponse) -> Self {
        Self {
            room_id: room.room_id,
            room_number: room.room_number,
            capacity: room.capacity,
        }
    }
}

impl From<AvailableRoomDBResponse> for AvailableRoomResponse {
    fn from(room: AvailableRoomDBResponse) -> Self {
        Self {
            room_id: room.room_id,
            room_number: room.room_number,
            capacity: room.capacity,
            occupied_count: room.occupied_count,
            available_spots: room.available_spots,
        }
    }
}
