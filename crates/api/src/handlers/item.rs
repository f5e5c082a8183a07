//! Handlers for the item catalog.
//!
//! List with filter/sort/pagination (sort columns are a closed set --
//! unrecognized values are rejected at deserialization, not defaulted),
//! plus create, get, and update.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use serde::Deserialize;

use shopfloor_core::error::CoreError;
use shopfloor_core::pagination::{clamp_page, clamp_per_page};
use shopfloor_core::types::DbId;
use shopfloor_db::models::item::{
    CreateItem, ItemListQuery, ItemSortColumn, ItemType, SortOrder, UpdateItem,
};
use shopfloor_db::repositories::ItemRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_ITEMS_PER_PAGE: i64 = 10;
const MAX_ITEMS_PER_PAGE: i64 = 100;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Filter, sort, and pagination parameters for `GET /items`.
#[derive(Debug, Deserialize)]
pub struct ListItemsParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub sort: Option<ItemSortColumn>,
    pub order: Option<SortOrder>,
    #[serde(rename = "type")]
    pub filter_type: Option<ItemType>,
    pub search: Option<String>,
}

// ---------------------------------------------------------------------------
// GET /items
// ---------------------------------------------------------------------------

/// List catalog items with filtering, sorting, and pagination.
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ListItemsParams>,
) -> AppResult<impl IntoResponse> {
    let query = ItemListQuery {
        sort_column: params.sort.unwrap_or(ItemSortColumn::Number),
        sort_order: params.order.unwrap_or(SortOrder::Asc),
        filter_type: params.filter_type,
        search_term: params.search.filter(|s| !s.trim().is_empty()),
        per_page: clamp_per_page(params.per_page, DEFAULT_ITEMS_PER_PAGE, MAX_ITEMS_PER_PAGE),
        page: clamp_page(params.page),
    };

    let page = ItemRepo::list(&state.pool, &query).await?;
    tracing::debug!(
        count = page.items.len(),
        total_pages = page.total_pages,
        "Listed items"
    );
    Ok(Json(DataResponse { data: page }))
}

// ---------------------------------------------------------------------------
// POST /items
// ---------------------------------------------------------------------------

/// Create a new catalog item.
pub async fn create_item(
    State(state): State<AppState>,
    Json(body): Json<CreateItem>,
) -> AppResult<impl IntoResponse> {
    if body.number.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Item number must not be empty".to_string(),
        )));
    }
    if body.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Item name must not be empty".to_string(),
        )));
    }

    let item = ItemRepo::create(&state.pool, &body).await?;
    tracing::info!(item_id = item.id, number = %item.number, "Item created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

// ---------------------------------------------------------------------------
// GET /items/{id}
// ---------------------------------------------------------------------------

/// Get a single item by ID.
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = ItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Item", id })?;
    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// PUT /items/{id}
// ---------------------------------------------------------------------------

/// Update an item, leaving omitted fields unchanged.
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateItem>,
) -> AppResult<impl IntoResponse> {
    let item = ItemRepo::update(&state.pool, id, &body)
        .await?
        .ok_or(CoreError::NotFound { entity: "Item", id })?;
    tracing::info!(item_id = item.id, "Item updated");
    Ok(Json(DataResponse { data: item }))
}
