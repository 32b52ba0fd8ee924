//! HTTP handler for the dashboard statistics endpoint.

use crate::{
    AppState,
    api::models::statistics::StatisticsResponse,
    db::handlers::Statistics,
    errors::{Error, Result},
};
use axum::{extract::State, response::Json};

/// Dashboard totals
#[utoipa::path(
    get,
    path = "/statistics",
    tag = "statistics",
    summary = "Get statistics",
    description = "Total counts of students, settlements, and payments",
    responses(
        (status = 200, description = "Current totals", body = StatisticsResponse),
        (status = 500, description = "Server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_statistics(State(state): State<AppState>) -> Result<Json<StatisticsResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Statistics::new(&mut pool_conn);

    let stats = repo.get().await?;

    Ok(Json(StatisticsResponse::from(stats)))
}
