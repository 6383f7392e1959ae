//! Oracle agent that reads the schedule directly.

use std::sync::Arc;

use super::trait_::Agent;
use crate::policy::Policy;
use crate::rl::action_space::ActionSpace;
use crate::state::{ActionVector, StateVector};

/// Picks the toggles that bring every device to its scheduled value at the
/// next tick.
///
/// Serves as the upper-bound baseline: in a [`ScheduleEnvironment`] with the
/// same step length it earns a reward of 1 on every step.
///
/// [`ScheduleEnvironment`]: crate::rl::ScheduleEnvironment
pub struct ScheduleAgent {
    policy: Arc<Policy>,
    minutes_per_step: u32,
}

impl ScheduleAgent {
    pub fn new(policy: Arc<Policy>, minutes_per_step: u32) -> Self {
        Self {
            policy,
            minutes_per_step,
        }
    }
}

impl Agent for ScheduleAgent {
    fn select_action(&mut self, state: &StateVector, space: &ActionSpace) -> usize {
        let next_time = state.time().advance(self.minutes_per_step);
        let target = self.policy.expected_flags(next_time);
        let action = ActionVector::correcting(&state.folded_flags(), &target);
        // A space built for the same policy always has a matching length.
        space.index_of(&action).unwrap_or(0)
    }

    fn name(&self) -> &str {
        "schedule"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::transition;
    use crate::state::DeviceFlags;
    use crate::time::PointInTime;

    #[test]
    fn correction_reaches_next_expected_state() {
        let policy = Arc::new(
            Policy::from_json_str(
                r#"{
                    "Devices": ["Lamp", "Fan", "Boiler"],
                    "Time format": "%H:%M",
                    "days": [0, 1, 2, 3, 4, 5, 6],
                    "0": [{"days": [0], "times": [["08:00", "10:00"]]}],
                    "1": [{"days": [0], "times": [["07:00", "07:59"]]}],
                    "2": []
                }"#,
            )
            .unwrap(),
        );
        let space = ActionSpace::for_policy(&policy).unwrap();
        let mut agent = ScheduleAgent::new(policy.clone(), 1);

        let now = PointInTime::new(0, 7, 59).unwrap();
        let state = StateVector::from_flags(now, &DeviceFlags::new(vec![false, true, true]));
        let index = agent.select_action(&state, &space);
        let action = space.get(index).unwrap();
        assert_eq!(action.as_slice(), &[true, true, true]);

        let next = transition::apply(&state, action);
        let next_time = now.advance(1);
        assert_eq!(next.folded_flags(), policy.expected_flags(next_time));
    }
}
