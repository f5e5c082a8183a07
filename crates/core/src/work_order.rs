//! Work order lifecycle state machine and input validation.
//!
//! A work order moves through a fixed transition graph:
//!
//! ```text
//! planned  --start-->             started
//! released --start-->             started
//! started  --declare(partial)-->  started
//! started  --declare(complete)--> completed
//! any non-terminal --cancel-->    cancelled
//! ```
//!
//! `completed` and `cancelled` are terminal; no transition leaves them.
//! The guards here decide legality only -- the atomic check-and-set that
//! enforces "one started order per line" lives in the repository layer.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Status of a production work order, mapped to the `work_order_status`
/// PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "work_order_status", rename_all = "lowercase")]
pub enum WorkOrderStatus {
    /// Scheduled, not yet released to the floor.
    Planned,
    /// Released to the floor, ready to start.
    Released,
    /// Currently executing on a production line.
    Started,
    /// Closed out with a final declaration.
    Completed,
    /// Abandoned before completion.
    Cancelled,
}

impl WorkOrderStatus {
    /// The lowercase database/API representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Released => "released",
            Self::Started => "started",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Terminal states admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// Statuses considered "active" for floor-facing work order lists.
pub const ACTIVE_STATUSES: &[WorkOrderStatus] = &[
    WorkOrderStatus::Planned,
    WorkOrderStatus::Released,
    WorkOrderStatus::Started,
];

/// Statuses shown in the completed-orders history view.
pub const CLOSED_STATUSES: &[WorkOrderStatus] =
    &[WorkOrderStatus::Completed, WorkOrderStatus::Cancelled];

// ---------------------------------------------------------------------------
// Transition guards
// ---------------------------------------------------------------------------

/// A work order may start only from `planned` or `released`.
pub fn ensure_startable(status: WorkOrderStatus) -> Result<(), CoreError> {
    match status {
        WorkOrderStatus::Planned | WorkOrderStatus::Released => Ok(()),
        other => Err(CoreError::InvalidState {
            entity: "WorkOrder",
            current: other.as_str(),
            operation: "start",
        }),
    }
}

/// Production may be declared only against a `started` work order.
pub fn ensure_declarable(status: WorkOrderStatus) -> Result<(), CoreError> {
    match status {
        WorkOrderStatus::Started => Ok(()),
        other => Err(CoreError::InvalidState {
            entity: "WorkOrder",
            current: other.as_str(),
            operation: "declare production against",
        }),
    }
}

/// Any non-terminal work order may be cancelled.
pub fn ensure_cancellable(status: WorkOrderStatus) -> Result<(), CoreError> {
    if status.is_terminal() {
        Err(CoreError::InvalidState {
            entity: "WorkOrder",
            current: status.as_str(),
            operation: "cancel",
        })
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

/// Upper bound on a single production declaration. Matches the cap applied
/// by the operator panel; oversized declarations are almost certainly typos.
pub const MAX_DECLARED_QUANTITY: f64 = 100_000.0;

/// Validate creation input before it reaches the repository.
pub fn validate_new_work_order(
    work_order_number: &str,
    item_number: &str,
    planned_quantity: f64,
) -> Result<(), CoreError> {
    if work_order_number.trim().is_empty() {
        return Err(CoreError::Validation(
            "Work order number must not be empty".to_string(),
        ));
    }
    if item_number.trim().is_empty() {
        return Err(CoreError::Validation(
            "Item number must not be empty".to_string(),
        ));
    }
    if !(planned_quantity > 0.0) {
        return Err(CoreError::Validation(
            "Planned quantity must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Validate a declared quantity. Fractional quantities are allowed
/// (weight-based production); the value must be positive and below the cap.
pub fn validate_declared_quantity(quantity: f64) -> Result<(), CoreError> {
    if !(quantity > 0.0) {
        return Err(CoreError::Validation(
            "Declared quantity must be greater than zero".to_string(),
        ));
    }
    if quantity > MAX_DECLARED_QUANTITY {
        return Err(CoreError::Validation(format!(
            "Declared quantity must not exceed {MAX_DECLARED_QUANTITY}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const ALL_STATUSES: [WorkOrderStatus; 5] = [
        WorkOrderStatus::Planned,
        WorkOrderStatus::Released,
        WorkOrderStatus::Started,
        WorkOrderStatus::Completed,
        WorkOrderStatus::Cancelled,
    ];

    // -- ensure_startable -----------------------------------------------------

    #[test]
    fn planned_and_released_are_startable() {
        assert!(ensure_startable(WorkOrderStatus::Planned).is_ok());
        assert!(ensure_startable(WorkOrderStatus::Released).is_ok());
    }

    #[test]
    fn started_and_terminal_statuses_are_not_startable() {
        for status in [
            WorkOrderStatus::Started,
            WorkOrderStatus::Completed,
            WorkOrderStatus::Cancelled,
        ] {
            let err = ensure_startable(status).unwrap_err();
            assert_matches!(
                err,
                CoreError::InvalidState { current, .. } if current == status.as_str()
            );
        }
    }

    #[test]
    fn start_error_names_the_current_status() {
        let err = ensure_startable(WorkOrderStatus::Completed).unwrap_err();
        assert!(err.to_string().contains("'completed'"));
    }

    // -- ensure_declarable ----------------------------------------------------

    #[test]
    fn only_started_orders_accept_declarations() {
        for status in ALL_STATUSES {
            let result = ensure_declarable(status);
            if status == WorkOrderStatus::Started {
                assert!(result.is_ok());
            } else {
                assert_matches!(result, Err(CoreError::InvalidState { .. }));
            }
        }
    }

    // -- ensure_cancellable ---------------------------------------------------

    #[test]
    fn non_terminal_orders_are_cancellable() {
        assert!(ensure_cancellable(WorkOrderStatus::Planned).is_ok());
        assert!(ensure_cancellable(WorkOrderStatus::Released).is_ok());
        assert!(ensure_cancellable(WorkOrderStatus::Started).is_ok());
    }

    #[test]
    fn terminal_orders_reject_cancel() {
        assert_matches!(
            ensure_cancellable(WorkOrderStatus::Completed),
            Err(CoreError::InvalidState { .. })
        );
        assert_matches!(
            ensure_cancellable(WorkOrderStatus::Cancelled),
            Err(CoreError::InvalidState { .. })
        );
    }

    // -- status properties ----------------------------------------------------

    #[test]
    fn terminal_flag_matches_transition_graph() {
        for status in ALL_STATUSES {
            let expected = matches!(
                status,
                WorkOrderStatus::Completed | WorkOrderStatus::Cancelled
            );
            assert_eq!(status.is_terminal(), expected);
        }
    }

    #[test]
    fn status_strings_are_lowercase_and_unique() {
        let strings: Vec<&str> = ALL_STATUSES.iter().map(|s| s.as_str()).collect();
        let mut unique = strings.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(strings.len(), unique.len());
        for s in strings {
            assert_eq!(s, s.to_lowercase());
        }
    }

    // -- validate_new_work_order ----------------------------------------------

    #[test]
    fn valid_creation_input_passes() {
        assert!(validate_new_work_order("WO-1001", "PK-500", 250.0).is_ok());
    }

    #[test]
    fn empty_work_order_number_rejected() {
        let err = validate_new_work_order("  ", "PK-500", 250.0).unwrap_err();
        assert!(err.to_string().contains("Work order number"));
    }

    #[test]
    fn empty_item_number_rejected() {
        let err = validate_new_work_order("WO-1001", "", 250.0).unwrap_err();
        assert!(err.to_string().contains("Item number"));
    }

    #[test]
    fn non_positive_planned_quantity_rejected() {
        assert_matches!(
            validate_new_work_order("WO-1001", "PK-500", 0.0),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_new_work_order("WO-1001", "PK-500", -5.0),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn nan_planned_quantity_rejected() {
        assert_matches!(
            validate_new_work_order("WO-1001", "PK-500", f64::NAN),
            Err(CoreError::Validation(_))
        );
    }

    // -- validate_declared_quantity -------------------------------------------

    #[test]
    fn fractional_declared_quantity_accepted() {
        assert!(validate_declared_quantity(0.25).is_ok());
    }

    #[test]
    fn non_positive_declared_quantity_rejected() {
        assert_matches!(validate_declared_quantity(0.0), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_declared_quantity(-1.0),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn declared_quantity_cap_enforced() {
        assert!(validate_declared_quantity(MAX_DECLARED_QUANTITY).is_ok());
        let err = validate_declared_quantity(MAX_DECLARED_QUANTITY + 1.0).unwrap_err();
        assert!(err.to_string().contains("must not exceed"));
    }
}
