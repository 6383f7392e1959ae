//! Exhaustive enumeration of binary toggle actions.

use thiserror::Error;

use crate::policy::Policy;
use crate::state::ActionVector;

/// Largest action dimension [`ActionSpace::build`] will materialize
/// (2^16 vectors of 16 toggles each).
pub const MAX_ACTION_DIM: usize = 16;

/// Requested action dimension is too large to enumerate eagerly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Action dimension {requested} exceeds the enumerable maximum of {max}")]
pub struct CapacityError {
    pub requested: usize,
    pub max: usize,
}

/// All `2^N` toggle vectors for `N` devices, in binary counting order.
///
/// The vector at index `i` has component `k` equal to bit `N - 1 - k` of `i`:
/// component 0 is the most significant bit. Index 0 is the idle action and
/// the last index toggles every device.
///
/// Built once per policy and then only read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSpace {
    action_dim: usize,
    actions: Vec<ActionVector>,
}

impl ActionSpace {
    /// Materializes every action for `action_dim` devices.
    ///
    /// Costs O(action_dim · 2^action_dim) time and memory, hence the
    /// [`MAX_ACTION_DIM`] bound.
    pub fn build(action_dim: usize) -> Result<Self, CapacityError> {
        if action_dim > MAX_ACTION_DIM {
            return Err(CapacityError {
                requested: action_dim,
                max: MAX_ACTION_DIM,
            });
        }
        let actions = (0..1usize << action_dim)
            .map(|index| Self::decode(action_dim, index))
            .collect();
        Ok(Self {
            action_dim,
            actions,
        })
    }

    /// Action space sized for `policy`'s devices.
    pub fn for_policy(policy: &Policy) -> Result<Self, CapacityError> {
        Self::build(policy.action_dim())
    }

    /// Computes the action at `index` without materializing the space.
    ///
    /// Returns `None` if `index >= 2^action_dim`. Works for any
    /// `action_dim` that fits in a `usize` index.
    pub fn action_at(action_dim: usize, index: usize) -> Option<ActionVector> {
        let in_range = match u32::try_from(action_dim) {
            Ok(bits) if bits < usize::BITS => index < 1usize << bits,
            _ => true,
        };
        in_range.then(|| Self::decode(action_dim, index))
    }

    fn decode(action_dim: usize, index: usize) -> ActionVector {
        (0..action_dim)
            .map(|k| {
                let shift = action_dim - 1 - k;
                shift < usize::BITS as usize && (index >> shift) & 1 == 1
            })
            .collect()
    }

    /// Inverse of the enumeration order: packs toggles into an index.
    ///
    /// Returns `None` when the vector length does not match this space.
    pub fn index_of(&self, action: &ActionVector) -> Option<usize> {
        if action.len() != self.action_dim {
            return None;
        }
        Some(
            action
                .iter()
                .fold(0usize, |acc, toggle| (acc << 1) | usize::from(toggle)),
        )
    }

    pub fn get(&self, index: usize) -> Option<&ActionVector> {
        self.actions.get(index)
    }

    pub fn action_dim(&self) -> usize {
        self.action_dim
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionVector> {
        self.actions.iter()
    }

    pub fn as_slice(&self) -> &[ActionVector] {
        &self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn bits(action: &ActionVector) -> Vec<u8> {
        action.iter().map(u8::from).collect()
    }

    #[test]
    fn three_devices_yield_eight_distinct_actions() {
        let space = ActionSpace::build(3).unwrap();
        assert_eq!(space.len(), 8);
        assert_eq!(bits(space.get(0).unwrap()), vec![0, 0, 0]);
        assert_eq!(bits(space.get(7).unwrap()), vec![1, 1, 1]);

        let distinct: HashSet<_> = space.iter().collect();
        assert_eq!(distinct.len(), 8);
    }

    #[test]
    fn ordering_is_binary_counting_msb_first() {
        let space = ActionSpace::build(3).unwrap();
        assert_eq!(bits(space.get(1).unwrap()), vec![0, 0, 1]);
        assert_eq!(bits(space.get(4).unwrap()), vec![1, 0, 0]);
        assert_eq!(bits(space.get(6).unwrap()), vec![1, 1, 0]);
    }

    #[test]
    fn index_of_inverts_enumeration() {
        let space = ActionSpace::build(4).unwrap();
        for (i, action) in space.iter().enumerate() {
            assert_eq!(space.index_of(action), Some(i));
        }
        assert_eq!(space.index_of(&ActionVector::idle(3)), None);
    }

    #[test]
    fn lazy_lookup_matches_materialized_space() {
        let space = ActionSpace::build(5).unwrap();
        for (i, action) in space.iter().enumerate() {
            assert_eq!(ActionSpace::action_at(5, i).as_ref(), Some(action));
        }
        assert!(ActionSpace::action_at(5, 32).is_none());
    }

    #[test]
    fn lazy_lookup_beyond_eager_bound() {
        let action = ActionSpace::action_at(40, 1).unwrap();
        assert_eq!(action.len(), 40);
        assert!(action.toggles(39));
        assert_eq!(action.iter().filter(|t| *t).count(), 1);
    }

    #[test]
    fn zero_devices_have_only_the_empty_action() {
        let space = ActionSpace::build(0).unwrap();
        assert_eq!(space.len(), 1);
        assert!(space.get(0).unwrap().is_empty());
    }

    #[test]
    fn capacity_is_enforced() {
        assert!(ActionSpace::build(MAX_ACTION_DIM).is_ok());
        let err = ActionSpace::build(MAX_ACTION_DIM + 1).unwrap_err();
        assert_eq!(
            err,
            CapacityError {
                requested: 17,
                max: 16
            }
        );
        assert_eq!(
            err.to_string(),
            "Action dimension 17 exceeds the enumerable maximum of 16"
        );
    }
}
