//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row and `Deserialize` DTOs for the writes that entity
//! supports.

pub mod downtime_event;
pub mod item;
pub mod production_line;
pub mod work_order;
