//! Production line models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use shopfloor_core::types::{DbId, Timestamp};

/// Line classification, mapped to the `production_line_type` PostgreSQL enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "production_line_type", rename_all = "lowercase")]
pub enum ProductionLineType {
    Roasting,
    Packaging,
    Grinding,
}

/// Operational status of a line, mapped to the `production_line_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "production_line_status", rename_all = "lowercase")]
pub enum ProductionLineStatus {
    Active,
    Inactive,
    Maintenance,
    Setup,
}

/// A row from the `production_lines` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductionLine {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub line_type: ProductionLineType,
    pub status: ProductionLineStatus,
    pub target_output_per_hour: f64,
    pub output_unit: String,
    /// What the line is running right now; maintained by work-order start.
    pub current_item_id: Option<DbId>,
    pub current_operator_id: Option<DbId>,
    pub last_changeover_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new production line.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductionLine {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub line_type: ProductionLineType,
    /// Defaults to active if omitted.
    pub status: Option<ProductionLineStatus>,
    pub target_output_per_hour: f64,
    pub output_unit: String,
}
