//! Additive toggle transition.

use crate::state::{ActionVector, StateVector};

/// Applies `action` to `current`: time components are copied unchanged and
/// each device level becomes `level + toggle`.
///
/// The caller must hand in a binary state and apply at most one action per
/// step. The result is not clamped: toggling a device that is already on
/// yields a level of 2, and folding it back into {0, 1} is the caller's job.
pub fn apply(current: &StateVector, action: &ActionVector) -> StateVector {
    debug_assert!(current.is_binary(), "transition input must be binary");
    debug_assert_eq!(
        current.device_count(),
        action.len(),
        "action length must match device count"
    );

    let levels = current
        .levels()
        .iter()
        .zip(action.iter())
        .map(|(&level, toggle)| level + u32::from(toggle))
        .collect();
    StateVector::from_levels(current.time(), levels)
}
