pub mod downtime;
pub mod health;
pub mod item;
pub mod production_line;
pub mod work_order;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /items                                   list, create
/// /items/{id}                              get, update
///
/// /production-lines                        list, create
/// /production-lines/{id}                   get
/// /production-lines/{id}/downtime-events   list for line
///
/// /work-orders                             list active (?production_line_id), create
/// /work-orders/completed                   list closed (?production_line_id, limit)
/// /work-orders/{id}                        get
/// /work-orders/{id}/start                  start (POST)
/// /work-orders/{id}/declare                declare production (POST)
/// /work-orders/{id}/cancel                 cancel (POST)
///
/// /downtime-events                         record (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Item catalog.
        .nest("/items", item::router())
        // Production lines and their downtime history.
        .nest("/production-lines", production_line::router())
        // Work order lifecycle.
        .nest("/work-orders", work_order::router())
        // Downtime event ingestion.
        .nest("/downtime-events", downtime::router())
}
