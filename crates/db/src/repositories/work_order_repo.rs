//! Repository for the `production_work_orders` table.
//!
//! Lifecycle transitions (start, declare, cancel) are expressed as single
//! conditional UPDATE statements so the status guard and the write are
//! evaluated by the database in one round trip. A `None` return means the
//! row either does not exist or is not in a state the transition accepts;
//! callers re-read the row to produce a precise error.

use sqlx::PgPool;
use shopfloor_core::types::DbId;
use shopfloor_core::work_order::WorkOrderStatus;

use crate::models::work_order::{CreateWorkOrder, WorkOrder, WorkOrderWithItem};

const COLUMNS: &str = "id, work_order_number, production_line_id, item_id, status, \
     planned_quantity, actual_quantity, planned_start_time, planned_end_time, \
     actual_start_time, actual_end_time, notes, created_at, updated_at";

/// Work order columns plus joined item and line display fields. Requires
/// aliases `w` (work order), `i` (item), and `l` (line) in the FROM clause.
const JOINED_COLUMNS: &str = "w.id, w.work_order_number, w.production_line_id, w.item_id, \
     w.status, w.planned_quantity, w.actual_quantity, w.planned_start_time, \
     w.planned_end_time, w.actual_start_time, w.actual_end_time, w.notes, \
     w.created_at, w.updated_at, \
     i.number AS item_number, i.name AS item_name, i.description AS item_description, \
     l.name AS production_line_name";

const JOINS: &str = "JOIN items i ON i.id = w.item_id \
     JOIN production_lines l ON l.id = w.production_line_id";

/// Provides CRUD and lifecycle operations for work orders.
pub struct WorkOrderRepo;

impl WorkOrderRepo {
    /// Insert a new work order in `planned` status with null actuals,
    /// returning the row joined with item and line display fields.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWorkOrder,
    ) -> Result<WorkOrderWithItem, sqlx::Error> {
        let query = format!(
            "WITH w AS ( \
                INSERT INTO production_work_orders \
                    (work_order_number, production_line_id, item_id, \
                     planned_quantity, planned_start_time, planned_end_time, notes) \
                VALUES ($1, $2, $3, $4, $5, $6, $7) \
                RETURNING * \
             ) \
             SELECT {JOINED_COLUMNS} FROM w {JOINS}"
        );
        sqlx::query_as::<_, WorkOrderWithItem>(&query)
            .bind(&input.work_order_number)
            .bind(input.production_line_id)
            .bind(input.item_id)
            .bind(input.planned_quantity)
            .bind(input.planned_start_time)
            .bind(input.planned_end_time)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a work order by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WorkOrder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM production_work_orders WHERE id = $1");
        sqlx::query_as::<_, WorkOrder>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a work order by ID with joined display fields.
    pub async fn find_with_item(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WorkOrderWithItem>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM production_work_orders w {JOINS} WHERE w.id = $1"
        );
        sqlx::query_as::<_, WorkOrderWithItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List work orders on a line filtered to the given statuses, ordered by
    /// planned start time.
    pub async fn list_by_line(
        pool: &PgPool,
        line_id: DbId,
        statuses: &[WorkOrderStatus],
    ) -> Result<Vec<WorkOrderWithItem>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM production_work_orders w {JOINS} \
             WHERE w.production_line_id = $1 AND w.status = ANY($2) \
             ORDER BY w.planned_start_time"
        );
        sqlx::query_as::<_, WorkOrderWithItem>(&query)
            .bind(line_id)
            .bind(statuses)
            .fetch_all(pool)
            .await
    }

    /// List recently closed (completed or cancelled) work orders on a line,
    /// newest first.
    pub async fn list_closed_by_line(
        pool: &PgPool,
        line_id: DbId,
        limit: i64,
    ) -> Result<Vec<WorkOrderWithItem>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM production_work_orders w {JOINS} \
             WHERE w.production_line_id = $1 \
               AND w.status IN ('completed', 'cancelled') \
             ORDER BY w.actual_end_time DESC NULLS LAST \
             LIMIT $2"
        );
        sqlx::query_as::<_, WorkOrderWithItem>(&query)
            .bind(line_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Count work orders currently started on a line.
    pub async fn count_started_on_line(pool: &PgPool, line_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM production_work_orders \
             WHERE production_line_id = $1 AND status = 'started'",
        )
        .bind(line_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Atomically start a work order: flip it to `started` and stamp
    /// `actual_start_time`, but only if it is still startable and no sibling
    /// on the line is started. Both checks and the write are one statement,
    /// so concurrent starts cannot both pass the sibling check and commit;
    /// the partial unique index on `(production_line_id) WHERE status =
    /// 'started'` rejects the loser of any remaining race with a unique
    /// violation.
    ///
    /// Returns `None` when the conditions did not hold (missing row, wrong
    /// line, wrong status, or line busy).
    pub async fn try_start(
        pool: &PgPool,
        id: DbId,
        line_id: DbId,
    ) -> Result<Option<WorkOrderWithItem>, sqlx::Error> {
        let query = format!(
            "WITH w AS ( \
                UPDATE production_work_orders wo SET \
                    status = 'started', \
                    actual_start_time = now() \
                WHERE wo.id = $1 \
                  AND wo.production_line_id = $2 \
                  AND wo.status IN ('planned', 'released') \
                  AND NOT EXISTS ( \
                      SELECT 1 FROM production_work_orders s \
                      WHERE s.production_line_id = $2 AND s.status = 'started' \
                  ) \
                RETURNING * \
             ) \
             SELECT {JOINED_COLUMNS} FROM w {JOINS}"
        );
        sqlx::query_as::<_, WorkOrderWithItem>(&query)
            .bind(id)
            .bind(line_id)
            .fetch_optional(pool)
            .await
    }

    /// Atomically declare produced quantity against a started work order.
    ///
    /// The increment is `COALESCE(actual_quantity, 0) + $2` evaluated in the
    /// database, so concurrent declarations never lose updates. When
    /// `complete` is set the same statement flips the status to `completed`
    /// and stamps `actual_end_time`.
    ///
    /// Returns `None` when the row is missing or not `started`.
    pub async fn try_declare(
        pool: &PgPool,
        id: DbId,
        quantity: f64,
        complete: bool,
    ) -> Result<Option<WorkOrder>, sqlx::Error> {
        let query = format!(
            "UPDATE production_work_orders SET \
                actual_quantity = COALESCE(actual_quantity, 0) + $2, \
                status = CASE WHEN $3 THEN 'completed'::work_order_status ELSE status END, \
                actual_end_time = CASE WHEN $3 THEN now() ELSE actual_end_time END \
             WHERE id = $1 AND status = 'started' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkOrder>(&query)
            .bind(id)
            .bind(quantity)
            .bind(complete)
            .fetch_optional(pool)
            .await
    }

    /// Cancel a non-terminal work order and stamp `actual_end_time`.
    ///
    /// Returns `None` when the row is missing or already terminal.
    pub async fn try_cancel(pool: &PgPool, id: DbId) -> Result<Option<WorkOrder>, sqlx::Error> {
        let query = format!(
            "UPDATE production_work_orders SET \
                status = 'cancelled', \
                actual_end_time = now() \
             WHERE id = $1 AND status NOT IN ('completed', 'cancelled') \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkOrder>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
