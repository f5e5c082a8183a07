//! Item catalog models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use shopfloor_core::types::{DbId, Timestamp};

/// Item classification, mapped to the `item_type` PostgreSQL enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "item_type", rename_all = "UPPERCASE")]
pub enum ItemType {
    /// Packaged finished good. Default for auto-provisioned items.
    Pack,
    /// Roasted coffee in bulk.
    Roast,
    /// Green (unroasted) coffee.
    Green,
    /// Consumable material (bags, labels, ...).
    Material,
}

/// A row from the `items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub number: String,
    pub name: String,
    pub description: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItem {
    pub number: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Defaults to true if omitted.
    pub is_active: Option<bool>,
}

/// DTO for updating an existing item. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,
    pub is_active: Option<bool>,
}

/// Sortable columns for item listings. A closed set: unrecognized column
/// names fail query-string deserialization instead of silently defaulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSortColumn {
    Number,
    Name,
    Type,
    CreatedAt,
    UpdatedAt,
    IsActive,
}

impl ItemSortColumn {
    /// The column name interpolated into ORDER BY. Never user-supplied text.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Name => "name",
            Self::Type => "type",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::IsActive => "is_active",
        }
    }
}

/// Sort direction for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Filter, sort, and pagination parameters for listing items.
#[derive(Debug, Clone)]
pub struct ItemListQuery {
    pub sort_column: ItemSortColumn,
    pub sort_order: SortOrder,
    pub filter_type: Option<ItemType>,
    pub search_term: Option<String>,
    pub per_page: i64,
    pub page: i64,
}

/// One page of items plus the total page count.
#[derive(Debug, Clone, Serialize)]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub total_pages: i64,
}
