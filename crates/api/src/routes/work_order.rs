//! Route definitions for the work order lifecycle.
//!
//! ```text
//! POST   /                create_work_order
//! GET    /                list_active (?production_line_id)
//! GET    /completed       list_completed (?production_line_id, limit)
//! GET    /{id}            get_work_order
//! POST   /{id}/start      start_work_order
//! POST   /{id}/declare    declare_production
//! POST   /{id}/cancel     cancel_work_order
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::work_order;
use crate::state::AppState;

/// Work order routes -- mounted at `/work-orders`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(work_order::list_active).post(work_order::create_work_order),
        )
        .route("/completed", get(work_order::list_completed))
        .route("/{id}", get(work_order::get_work_order))
        .route("/{id}/start", post(work_order::start_work_order))
        .route("/{id}/declare", post(work_order::declare_production))
        .route("/{id}/cancel", post(work_order::cancel_work_order))
}
