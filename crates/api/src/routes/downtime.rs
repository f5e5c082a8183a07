//! Route definitions for downtime event ingestion.
//!
//! ```text
//! POST   /    record_downtime_event
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::downtime;
use crate::state::AppState;

/// Downtime event routes -- mounted at `/downtime-events`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(downtime::record_downtime_event))
}
