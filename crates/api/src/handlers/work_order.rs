//! Handlers for the work order lifecycle.
//!
//! Create, start, declare-production, and cancel, plus the floor-facing
//! list and detail views. Transition guards live in `shopfloor_core`; the
//! atomic check-and-set statements live in `WorkOrderRepo`. Handlers tie
//! the two together and turn a `None` from a conditional update into a
//! precise error by re-reading the row.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use serde::Deserialize;

use shopfloor_core::error::CoreError;
use shopfloor_core::pagination::clamp_per_page;
use shopfloor_core::types::DbId;
use shopfloor_core::work_order::{
    self, ensure_cancellable, ensure_declarable, ensure_startable, ACTIVE_STATUSES,
};
use shopfloor_db::models::work_order::{
    CreateWorkOrder, CreateWorkOrderRequest, DeclareProductionRequest, StartWorkOrderRequest,
    WorkOrder,
};
use shopfloor_db::repositories::{ItemRepo, ProductionLineRepo, WorkOrderRepo};

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Constraint backing the "one started order per line" invariant; a unique
/// violation on it means we lost a start race.
const STARTED_PER_LINE_CONSTRAINT: &str = "uq_work_orders_one_started_per_line";

const LINE_BUSY_MESSAGE: &str = "Another work order is already in progress on this line";

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Parameters for listing active work orders.
#[derive(Debug, Deserialize)]
pub struct ListActiveParams {
    pub production_line_id: DbId,
}

/// Parameters for listing closed work orders.
#[derive(Debug, Deserialize)]
pub struct ListCompletedParams {
    pub production_line_id: DbId,
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a work order or fail with `NotFound`.
async fn ensure_work_order_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<WorkOrder> {
    WorkOrderRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "WorkOrder",
            id,
        })
    })
}

// ---------------------------------------------------------------------------
// POST /work-orders
// ---------------------------------------------------------------------------

/// Create a new work order in `planned` status.
///
/// The item is resolved by number and auto-provisioned (type PACK, active)
/// when the number has never been seen.
pub async fn create_work_order(
    State(state): State<AppState>,
    Json(body): Json<CreateWorkOrderRequest>,
) -> AppResult<impl IntoResponse> {
    work_order::validate_new_work_order(
        &body.work_order_number,
        &body.item_number,
        body.planned_quantity,
    )?;

    let line = ProductionLineRepo::find_by_id(&state.pool, body.production_line_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "ProductionLine",
            id: body.production_line_id,
        })?;

    let item = ItemRepo::get_or_create(&state.pool, &body.item_number, &body.item_name).await?;

    let input = CreateWorkOrder {
        work_order_number: body.work_order_number.clone(),
        production_line_id: line.id,
        item_id: item.id,
        planned_quantity: body.planned_quantity,
        planned_start_time: body.planned_start_time,
        planned_end_time: body.planned_end_time,
        notes: body.notes.clone(),
    };

    let created = WorkOrderRepo::create(&state.pool, &input).await?;

    tracing::info!(
        work_order_id = created.id,
        work_order_number = %created.work_order_number,
        production_line_id = line.id,
        item_id = item.id,
        "Work order created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /work-orders
// ---------------------------------------------------------------------------

/// List active (planned, released, started) work orders for a line,
/// ordered by planned start time.
pub async fn list_active(
    State(state): State<AppState>,
    Query(params): Query<ListActiveParams>,
) -> AppResult<impl IntoResponse> {
    let items =
        WorkOrderRepo::list_by_line(&state.pool, params.production_line_id, ACTIVE_STATUSES)
            .await?;
    tracing::debug!(
        count = items.len(),
        production_line_id = params.production_line_id,
        "Listed active work orders"
    );
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /work-orders/completed
// ---------------------------------------------------------------------------

/// List recently closed (completed or cancelled) work orders for a line,
/// newest first.
pub async fn list_completed(
    State(state): State<AppState>,
    Query(params): Query<ListCompletedParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_per_page(params.limit, 50, 200);
    let items =
        WorkOrderRepo::list_closed_by_line(&state.pool, params.production_line_id, limit).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /work-orders/{id}
// ---------------------------------------------------------------------------

/// Get a single work order with joined item and line display fields.
pub async fn get_work_order(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = WorkOrderRepo::find_with_item(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "WorkOrder",
            id,
        })?;
    Ok(Json(DataResponse { data: order }))
}

// ---------------------------------------------------------------------------
// POST /work-orders/{id}/start
// ---------------------------------------------------------------------------

/// Start a work order on its production line.
///
/// Fails with INVALID_STATE unless the order is planned or released, and
/// with CONFLICT when another order is already started on the line. The
/// status flip is a single conditional UPDATE (see `WorkOrderRepo::try_start`),
/// so two concurrent starts on one line cannot both succeed.
pub async fn start_work_order(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<StartWorkOrderRequest>,
) -> AppResult<impl IntoResponse> {
    let order = ensure_work_order_exists(&state.pool, id).await?;

    if order.production_line_id != body.production_line_id {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Work order {id} is scheduled on production line {}, not {}",
            order.production_line_id, body.production_line_id
        ))));
    }

    ensure_startable(order.status)?;

    // Friendly pre-check; the conditional update below remains authoritative.
    if WorkOrderRepo::count_started_on_line(&state.pool, body.production_line_id).await? > 0 {
        return Err(AppError::Core(CoreError::Conflict(
            LINE_BUSY_MESSAGE.to_string(),
        )));
    }

    let started = match WorkOrderRepo::try_start(&state.pool, id, body.production_line_id).await {
        Ok(Some(order)) => order,
        Ok(None) => {
            // The conditional update declined: either the status moved under
            // us or another order grabbed the line. Re-read for a precise error.
            let current = ensure_work_order_exists(&state.pool, id).await?;
            ensure_startable(current.status)?;
            return Err(AppError::Core(CoreError::Conflict(
                LINE_BUSY_MESSAGE.to_string(),
            )));
        }
        Err(err) if is_unique_violation(&err, STARTED_PER_LINE_CONSTRAINT) => {
            // Lost the race at the index; same outcome as the busy check.
            return Err(AppError::Core(CoreError::Conflict(
                LINE_BUSY_MESSAGE.to_string(),
            )));
        }
        Err(err) => return Err(err.into()),
    };

    // Secondary write: point the line at the item now running. The order is
    // already started; a failure here must not be reported as a clean error.
    match ProductionLineRepo::set_current_item(&state.pool, body.production_line_id, started.item_id)
        .await
    {
        Ok(true) => {}
        Ok(false) => {
            return Err(AppError::Core(CoreError::PartialFailure {
                step: "production line changeover update",
                detail: format!("production line {} no longer exists", body.production_line_id),
            }));
        }
        Err(err) => {
            return Err(AppError::Core(CoreError::PartialFailure {
                step: "production line changeover update",
                detail: err.to_string(),
            }));
        }
    }

    tracing::info!(
        work_order_id = started.id,
        production_line_id = body.production_line_id,
        item_id = started.item_id,
        "Work order started"
    );

    Ok(Json(DataResponse { data: started }))
}

// ---------------------------------------------------------------------------
// POST /work-orders/{id}/declare
// ---------------------------------------------------------------------------

/// Declare produced quantity against a started work order.
///
/// The quantity is added to `actual_quantity` atomically in the database;
/// `complete = true` also closes the order out and stamps `actual_end_time`.
pub async fn declare_production(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<DeclareProductionRequest>,
) -> AppResult<impl IntoResponse> {
    work_order::validate_declared_quantity(body.quantity)?;

    match WorkOrderRepo::try_declare(&state.pool, id, body.quantity, body.complete).await? {
        Some(updated) => {
            tracing::info!(
                work_order_id = updated.id,
                quantity = body.quantity,
                complete = body.complete,
                actual_quantity = updated.actual_quantity,
                "Production declared"
            );
            Ok(Json(DataResponse { data: updated }))
        }
        None => {
            let current = ensure_work_order_exists(&state.pool, id).await?;
            ensure_declarable(current.status)?;
            // Startable status flipped between the update and the re-read.
            Err(AppError::Core(CoreError::Conflict(
                "Work order changed concurrently; re-read and retry".to_string(),
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// POST /work-orders/{id}/cancel
// ---------------------------------------------------------------------------

/// Cancel a non-terminal work order.
pub async fn cancel_work_order(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    match WorkOrderRepo::try_cancel(&state.pool, id).await? {
        Some(cancelled) => {
            tracing::info!(work_order_id = cancelled.id, "Work order cancelled");
            Ok(Json(DataResponse { data: cancelled }))
        }
        None => {
            let current = ensure_work_order_exists(&state.pool, id).await?;
            ensure_cancellable(current.status)?;
            Err(AppError::Core(CoreError::Conflict(
                "Work order changed concurrently; re-read and retry".to_string(),
            )))
        }
    }
}
