//! Route definitions for production lines.
//!
//! ```text
//! GET    /                       list_lines
//! POST   /                       create_line
//! GET    /{id}                   get_line
//! GET    /{id}/downtime-events   list_downtime_for_line (?limit)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::{downtime, production_line};
use crate::state::AppState;

/// Production line routes -- mounted at `/production-lines`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(production_line::list_lines).post(production_line::create_line),
        )
        .route("/{id}", get(production_line::get_line))
        .route(
            "/{id}/downtime-events",
            get(downtime::list_downtime_for_line),
        )
}
