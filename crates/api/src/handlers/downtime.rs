//! Handlers for downtime event ingestion and history.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use serde::Deserialize;

use shopfloor_core::error::CoreError;
use shopfloor_core::pagination::clamp_per_page;
use shopfloor_core::types::DbId;
use shopfloor_db::models::downtime_event::CreateDowntimeEvent;
use shopfloor_db::repositories::{DowntimeEventRepo, ProductionLineRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Parameters for listing downtime events.
#[derive(Debug, Deserialize)]
pub struct ListDowntimeParams {
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// POST /downtime-events
// ---------------------------------------------------------------------------

/// Record a downtime event against a production line.
pub async fn record_downtime_event(
    State(state): State<AppState>,
    Json(body): Json<CreateDowntimeEvent>,
) -> AppResult<impl IntoResponse> {
    if body.reason.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Reason is required".to_string(),
        )));
    }
    if let Some(end) = body.end_time {
        if end < body.start_time {
            return Err(AppError::Core(CoreError::Validation(
                "End time must not be before start time".to_string(),
            )));
        }
    }

    ProductionLineRepo::find_by_id(&state.pool, body.production_line_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "ProductionLine",
            id: body.production_line_id,
        })?;

    let event = DowntimeEventRepo::create(&state.pool, &body).await?;
    tracing::info!(
        downtime_event_id = event.id,
        production_line_id = event.production_line_id,
        "Downtime event recorded"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

// ---------------------------------------------------------------------------
// GET /production-lines/{id}/downtime-events
// ---------------------------------------------------------------------------

/// List downtime events for a production line, newest first.
pub async fn list_downtime_for_line(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ListDowntimeParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_per_page(params.limit, 50, 200);
    let events = DowntimeEventRepo::list_by_line(&state.pool, id, limit).await?;
    Ok(Json(DataResponse { data: events }))
}
