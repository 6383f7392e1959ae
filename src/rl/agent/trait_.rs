//! Agent trait for the schedule environment.

use crate::rl::action_space::ActionSpace;
use crate::state::StateVector;

/// Chooses an action for the current state.
///
/// Actions are indices into the [`ActionSpace`] the environment was built with.
pub trait Agent: Send {
    /// Selects one action index for `state`.
    fn select_action(&mut self, state: &StateVector, space: &ActionSpace) -> usize;

    /// Returns a human-readable name for this agent.
    fn name(&self) -> &str;
}
