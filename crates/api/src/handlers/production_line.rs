//! Handlers for production lines.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use shopfloor_core::error::CoreError;
use shopfloor_core::types::DbId;
use shopfloor_db::models::production_line::CreateProductionLine;
use shopfloor_db::repositories::ProductionLineRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /production-lines
// ---------------------------------------------------------------------------

/// List all production lines, ordered by name.
pub async fn list_lines(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let lines = ProductionLineRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: lines }))
}

// ---------------------------------------------------------------------------
// POST /production-lines
// ---------------------------------------------------------------------------

/// Create a new production line.
pub async fn create_line(
    State(state): State<AppState>,
    Json(body): Json<CreateProductionLine>,
) -> AppResult<impl IntoResponse> {
    if body.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Production line name must not be empty".to_string(),
        )));
    }

    let line = ProductionLineRepo::create(&state.pool, &body).await?;
    tracing::info!(production_line_id = line.id, name = %line.name, "Production line created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: line })))
}

// ---------------------------------------------------------------------------
// GET /production-lines/{id}
// ---------------------------------------------------------------------------

/// Get a single production line by ID.
pub async fn get_line(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let line = ProductionLineRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "ProductionLine",
            id,
        })?;
    Ok(Json(DataResponse { data: line }))
}
