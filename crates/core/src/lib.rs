//! Shopfloor domain core.
//!
//! Pure domain logic shared by the persistence and API layers: ID and
//! timestamp aliases, the error taxonomy, the work-order lifecycle state
//! machine, and pagination helpers. No I/O lives here.

pub mod error;
pub mod pagination;
pub mod types;
pub mod work_order;
