//! HTTP handlers for room endpoints.

use crate::{
    AppState,
    api::models::rooms::{AvailableRoomResponse, RoomResponse},
    db::handlers::Rooms,
    errors::{Error, Result},
};
use axum::{extract::State, response::Json};

/// List all rooms
#[utoipa::path(
    get,
    path = "/rooms",
    tag = "rooms",
    summary = "List rooms",
    responses(
        (status = 200, description = "All rooms", body = Vec<RoomResponse>),
        (status = 500, description = "Server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<RoomResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Rooms::new(&mut pool_conn);

    let rooms = repo.list().await?;

    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}

/// List rooms that still have free spots
#[utoipa::path(
    get,
    path = "/rooms/available",
    tag = "rooms",
    summary = "List available rooms",
    description = "Rooms with at least one free spot, annotated with occupancy, ordered by room number",
    responses(
        (status = 200, description = "Rooms with free spots", body = Vec<AvailableRoomResponse>),
        (status = 500, description = "Server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_available_rooms(State(state): State<AppState>) -> Result<Json<Vec<AvailableRoomResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Rooms::new(&mut pool_conn);

    let rooms = repo.list_available().await?;

    Ok(Json(rooms.into_iter().map(AvailableRoomResponse::from).collect()))
}
