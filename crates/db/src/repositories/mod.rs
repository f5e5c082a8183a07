//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod downtime_event_repo;
pub mod item_repo;
pub mod production_line_repo;
pub mod work_order_repo;

pub use downtime_event_repo::DowntimeEventRepo;
pub use item_repo::ItemRepo;
pub use production_line_repo::ProductionLineRepo;
pub use work_order_repo::WorkOrderRepo;
