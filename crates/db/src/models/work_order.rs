//! Work order models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use shopfloor_core::types::{DbId, Timestamp};
use shopfloor_core::work_order::WorkOrderStatus;

/// A row from the `production_work_orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkOrder {
    pub id: DbId,
    pub work_order_number: String,
    pub production_line_id: DbId,
    pub item_id: DbId,
    pub status: WorkOrderStatus,
    pub planned_quantity: f64,
    pub actual_quantity: Option<f64>,
    pub planned_start_time: Timestamp,
    pub planned_end_time: Option<Timestamp>,
    pub actual_start_time: Option<Timestamp>,
    pub actual_end_time: Option<Timestamp>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A work order row joined with its item and line display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkOrderWithItem {
    pub id: DbId,
    pub work_order_number: String,
    pub production_line_id: DbId,
    pub item_id: DbId,
    pub status: WorkOrderStatus,
    pub planned_quantity: f64,
    pub actual_quantity: Option<f64>,
    pub planned_start_time: Timestamp,
    pub planned_end_time: Option<Timestamp>,
    pub actual_start_time: Option<Timestamp>,
    pub actual_end_time: Option<Timestamp>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub item_number: String,
    pub item_name: String,
    pub item_description: Option<String>,
    pub production_line_name: String,
}

/// DTO for inserting a new work order (item already resolved to an id).
#[derive(Debug, Clone)]
pub struct CreateWorkOrder {
    pub work_order_number: String,
    pub production_line_id: DbId,
    pub item_id: DbId,
    pub planned_quantity: f64,
    pub planned_start_time: Timestamp,
    pub planned_end_time: Option<Timestamp>,
    pub notes: Option<String>,
}

/// Request body from the API for creating a new work order. Carries the
/// item *number* and display name; the item is resolved (or auto-provisioned)
/// before insert.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkOrderRequest {
    pub work_order_number: String,
    pub item_number: String,
    pub item_name: String,
    pub production_line_id: DbId,
    pub planned_quantity: f64,
    pub planned_start_time: Timestamp,
    pub planned_end_time: Option<Timestamp>,
    pub notes: Option<String>,
}

/// Request body for starting a work order.
#[derive(Debug, Clone, Deserialize)]
pub struct StartWorkOrderRequest {
    pub production_line_id: DbId,
}

/// Request body for declaring produced quantity.
#[derive(Debug, Clone, Deserialize)]
pub struct DeclareProductionRequest {
    pub quantity: f64,
    /// When true, the declaration also closes out the work order.
    #[serde(default)]
    pub complete: bool,
}
