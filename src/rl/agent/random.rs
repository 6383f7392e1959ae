//! Random agent for testing and baselines.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::trait_::Agent;
use crate::rl::action_space::ActionSpace;
use crate::state::StateVector;

/// Uniformly random action selection, ignoring the state.
///
/// Used for sanity checks and as a lower-bound baseline.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, _state: &StateVector, space: &ActionSpace) -> usize {
        self.rng.gen_range(0..space.len())
    }

    fn name(&self) -> &str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::sampler::Sampler;

    #[test]
    fn random_agent_actions_in_range() {
        let space = ActionSpace::build(3).unwrap();
        let mut sampler = Sampler::seeded(3, 5);
        let mut agent = RandomAgent::new(9);
        for _ in 0..200 {
            let state = sampler.random_state();
            assert!(agent.select_action(&state, &space) < 8);
        }
    }

    #[test]
    fn random_agent_is_seeded() {
        let space = ActionSpace::build(4).unwrap();
        let state = Sampler::seeded(4, 0).random_state();
        let mut a = RandomAgent::new(1);
        let mut b = RandomAgent::new(1);
        for _ in 0..20 {
            assert_eq!(
                a.select_action(&state, &space),
                b.select_action(&state, &space)
            );
        }
    }
}
