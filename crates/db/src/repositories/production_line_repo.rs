//! Repository for the `production_lines` table.

use sqlx::PgPool;
use shopfloor_core::types::DbId;

use crate::models::production_line::{CreateProductionLine, ProductionLine};

const COLUMNS: &str = "id, name, description, type, status, target_output_per_hour, \
     output_unit, current_item_id, current_operator_id, last_changeover_at, \
     created_at, updated_at";

/// Provides read and pointer-update operations for production lines.
pub struct ProductionLineRepo;

impl ProductionLineRepo {
    /// Insert a new production line.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProductionLine,
    ) -> Result<ProductionLine, sqlx::Error> {
        let query = format!(
            "INSERT INTO production_lines \
                (name, description, type, status, target_output_per_hour, output_unit) \
             VALUES ($1, $2, $3, COALESCE($4, 'active'), $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductionLine>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.line_type)
            .bind(input.status)
            .bind(input.target_output_per_hour)
            .bind(&input.output_unit)
            .fetch_one(pool)
            .await
    }

    /// Find a production line by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductionLine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM production_lines WHERE id = $1");
        sqlx::query_as::<_, ProductionLine>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all production lines, ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProductionLine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM production_lines ORDER BY name");
        sqlx::query_as::<_, ProductionLine>(&query)
            .fetch_all(pool)
            .await
    }

    /// Point the line at the item it is now running and stamp the changeover.
    ///
    /// Written only by work-order start. Returns false when the line row
    /// does not exist.
    pub async fn set_current_item(
        pool: &PgPool,
        line_id: DbId,
        item_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE production_lines SET \
                current_item_id = $2, \
                last_changeover_at = now() \
             WHERE id = $1",
        )
        .bind(line_id)
        .bind(item_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
