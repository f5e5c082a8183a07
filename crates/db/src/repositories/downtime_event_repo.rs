//! Repository for the `downtime_events` table.

use sqlx::PgPool;
use shopfloor_core::types::DbId;

use crate::models::downtime_event::{CreateDowntimeEvent, DowntimeEvent};

const COLUMNS: &str = "id, production_line_id, work_order_id, category, impact_level, \
     start_time, end_time, reason, action_taken, reported_by, created_at";

/// Provides insert and list operations for downtime events.
pub struct DowntimeEventRepo;

impl DowntimeEventRepo {
    /// Record a new downtime event.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDowntimeEvent,
    ) -> Result<DowntimeEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO downtime_events \
                (production_line_id, work_order_id, category, impact_level, \
                 start_time, end_time, reason, action_taken, reported_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DowntimeEvent>(&query)
            .bind(input.production_line_id)
            .bind(input.work_order_id)
            .bind(input.category)
            .bind(input.impact_level)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.reason)
            .bind(&input.action_taken)
            .bind(&input.reported_by)
            .fetch_one(pool)
            .await
    }

    /// List downtime events for a production line, newest first.
    pub async fn list_by_line(
        pool: &PgPool,
        line_id: DbId,
        limit: i64,
    ) -> Result<Vec<DowntimeEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM downtime_events \
             WHERE production_line_id = $1 \
             ORDER BY start_time DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, DowntimeEvent>(&query)
            .bind(line_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
