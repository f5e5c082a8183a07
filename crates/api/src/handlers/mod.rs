//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input with `shopfloor_core`, delegate to the
//! corresponding repository in `shopfloor_db`, and map errors via
//! [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod downtime;
pub mod item;
pub mod production_line;
pub mod work_order;
