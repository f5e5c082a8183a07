//! Downtime event models and DTOs. Additive audit data only.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use shopfloor_core::types::{DbId, Timestamp};

/// Downtime classification, mapped to the `downtime_category` PostgreSQL enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "downtime_category", rename_all = "lowercase")]
pub enum DowntimeCategory {
    Planned,
    Unplanned,
    Maintenance,
    Setup,
    Quality,
}

/// How severely the interruption affected output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "downtime_impact", rename_all = "lowercase")]
pub enum DowntimeImpact {
    None,
    Partial,
    Complete,
}

/// A row from the `downtime_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DowntimeEvent {
    pub id: DbId,
    pub production_line_id: DbId,
    pub work_order_id: Option<DbId>,
    pub category: DowntimeCategory,
    pub impact_level: DowntimeImpact,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub reason: String,
    pub action_taken: Option<String>,
    pub reported_by: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for recording a new downtime event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDowntimeEvent {
    pub production_line_id: DbId,
    pub work_order_id: Option<DbId>,
    pub category: DowntimeCategory,
    pub impact_level: DowntimeImpact,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub reason: String,
    pub action_taken: Option<String>,
    /// Identity of the reporter, resolved by the caller's auth layer.
    pub reported_by: Option<String>,
}
