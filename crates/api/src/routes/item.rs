//! Route definitions for the item catalog.
//!
//! ```text
//! GET    /        list_items (?page, per_page, sort, order, type, search)
//! POST   /        create_item
//! GET    /{id}    get_item
//! PUT    /{id}    update_item
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::item;
use crate::state::AppState;

/// Item catalog routes -- mounted at `/items`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(item::list_items).post(item::create_item))
        .route("/{id}", get(item::get_item).put(item::update_item))
}
