//! Repository for the `items` table.

use sqlx::PgPool;
use shopfloor_core::pagination::total_pages;
use shopfloor_core::types::DbId;

use crate::models::item::{CreateItem, Item, ItemListQuery, ItemPage, UpdateItem};

const COLUMNS: &str = "id, number, name, description, type, is_active, created_at, updated_at";

/// Provides CRUD operations for catalog items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item.
    pub async fn create(pool: &PgPool, input: &CreateItem) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items (number, name, description, type, is_active) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(&input.number)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.item_type)
            .bind(input.is_active.unwrap_or(true))
            .fetch_one(pool)
            .await
    }

    /// Find an item by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an item by its unique human-readable number.
    pub async fn find_by_number(pool: &PgPool, number: &str) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE number = $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(number)
            .fetch_optional(pool)
            .await
    }

    /// Resolve an item by number, auto-provisioning it when absent.
    ///
    /// Auto-provisioned items get type PACK and are active. The insert uses
    /// `ON CONFLICT DO NOTHING` so two concurrent resolutions of the same
    /// unseen number still yield exactly one row.
    pub async fn get_or_create(
        pool: &PgPool,
        number: &str,
        name: &str,
    ) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items (number, name, type, is_active) \
             VALUES ($1, $2, 'PACK', TRUE) \
             ON CONFLICT ON CONSTRAINT uq_items_number DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Item>(&query)
            .bind(number)
            .bind(name)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(item) => {
                tracing::info!(item_id = item.id, number, "Auto-provisioned item");
                Ok(item)
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM items WHERE number = $1");
                sqlx::query_as::<_, Item>(&query)
                    .bind(number)
                    .fetch_one(pool)
                    .await
            }
        }
    }

    /// Update an item, leaving omitted fields unchanged.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateItem,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "UPDATE items SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                type = COALESCE($4, type), \
                is_active = COALESCE($5, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.item_type)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// List items with filtering, sorting, and pagination.
    ///
    /// The ORDER BY column comes from [`ItemSortColumn::as_sql`], a closed
    /// set, never raw user input.
    ///
    /// [`ItemSortColumn::as_sql`]: crate::models::item::ItemSortColumn::as_sql
    pub async fn list(pool: &PgPool, params: &ItemListQuery) -> Result<ItemPage, sqlx::Error> {
        let filter = "($1::item_type IS NULL OR type = $1) \
             AND ($2::text IS NULL OR number ILIKE $2 OR name ILIKE $2)";
        let pattern = params.search_term.as_ref().map(|t| format!("%{t}%"));
        let offset = (params.page - 1) * params.per_page;

        let query = format!(
            "SELECT {COLUMNS} FROM items \
             WHERE {filter} \
             ORDER BY {} {}, id \
             LIMIT $3 OFFSET $4",
            params.sort_column.as_sql(),
            params.sort_order.as_sql(),
        );
        let items = sqlx::query_as::<_, Item>(&query)
            .bind(params.filter_type)
            .bind(&pattern)
            .bind(params.per_page)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM items WHERE {filter}");
        let row: (i64,) = sqlx::query_as(&count_query)
            .bind(params.filter_type)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

        Ok(ItemPage {
            items,
            total_pages: total_pages(row.0, params.per_page),
        })
    }
}
