//! Schedule-following RL environment.
//!
//! Each step runs: pick action → toggle devices → fold levels → advance
//! clock → score against the schedule.

use std::sync::Arc;

use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{debug, trace};

use super::action_space::{ActionSpace, CapacityError};
use super::config::EnvConfig;
use super::reward::RewardScorer;
use super::sampler::Sampler;
use super::transition;
use crate::policy::Policy;
use crate::state::StateVector;

/// Errors raised while assembling a [`ScheduleEnvironment`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error(transparent)]
    Capacity(#[from] CapacityError),

    #[error("Action space toggles {actual} devices but the policy has {expected}")]
    ActionSpaceMismatch { expected: usize, actual: usize },
}

/// Result of a single environment step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// State after the action, at the new time.
    pub state: StateVector,
    /// Schedule-matching reward of `state`.
    pub reward: f64,
    /// Whether the episode horizon has been reached.
    pub done: bool,
    /// Steps taken so far in this episode.
    pub time_step: u32,
}

/// Environment in which an agent learns to follow a weekly device schedule.
///
/// The policy and action space are shared read-only; several environments
/// may hold the same `Arc`s and run on different threads.
///
/// # Lifecycle
///
/// 1. Create with [`ScheduleEnvironment::new`].
/// 2. Call [`ScheduleEnvironment::reset`] to draw a random starting state.
/// 3. Call [`ScheduleEnvironment::step`] with action indices until `done`.
#[derive(Debug)]
pub struct ScheduleEnvironment {
    /// Environment configuration.
    pub config: EnvConfig,
    policy: Arc<Policy>,
    action_space: Arc<ActionSpace>,
    sampler: Sampler<StdRng>,
    state: StateVector,
    /// Current step within the episode.
    pub t: u32,
    /// Cumulative reward this episode.
    pub cumulative_reward: f64,
}

impl ScheduleEnvironment {
    /// Creates an environment, enumerating the action space for `policy`.
    pub fn new(policy: Arc<Policy>, config: EnvConfig) -> Result<Self, EnvironmentError> {
        let action_space = Arc::new(ActionSpace::for_policy(&policy)?);
        Self::with_action_space(policy, action_space, config)
    }

    /// Creates an environment reusing an already built action space.
    ///
    /// Fails if `action_space` was not built for `policy`'s device count.
    pub fn with_action_space(
        policy: Arc<Policy>,
        action_space: Arc<ActionSpace>,
        config: EnvConfig,
    ) -> Result<Self, EnvironmentError> {
        if action_space.action_dim() != policy.action_dim() {
            return Err(EnvironmentError::ActionSpaceMismatch {
                expected: policy.action_dim(),
                actual: action_space.action_dim(),
            });
        }
        let mut sampler = Sampler::seeded(policy.device_count(), config.seed);
        let state = sampler.random_state();
        Ok(Self {
            config,
            policy,
            action_space,
            sampler,
            state,
            t: 0,
            cumulative_reward: 0.0,
        })
    }

    pub fn policy(&self) -> &Arc<Policy> {
        &self.policy
    }

    pub fn action_space(&self) -> &Arc<ActionSpace> {
        &self.action_space
    }

    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// Starts a new episode from a random, schedule-agnostic state.
    pub fn reset(&mut self) -> StateVector {
        self.state = self.sampler.random_state();
        self.t = 0;
        self.cumulative_reward = 0.0;
        debug!(start = %self.state.time(), "episode reset");
        self.state.clone()
    }

    /// Applies the action at `action_index` and advances the clock.
    ///
    /// # Panics
    ///
    /// Panics if `action_index` is outside the action space.
    pub fn step(&mut self, action_index: usize) -> StepResult {
        assert!(
            action_index < self.action_space.len(),
            "Action index {} out of range for {} actions",
            action_index,
            self.action_space.len()
        );
        let action = &self.action_space.as_slice()[action_index];

        let toggled = transition::apply(&self.state, action);
        let time = toggled.time().advance(self.config.minutes_per_step);
        let next = StateVector::from_flags(time, &toggled.folded_flags());

        let reward = RewardScorer::score(&self.policy, &next, time);
        self.cumulative_reward += reward;
        self.t += 1;
        self.state = next.clone();

        trace!(t = self.t, action = action_index, reward, "step");

        StepResult {
            state: next,
            reward,
            done: self.t >= self.config.episode_horizon,
            time_step: self.t,
        }
    }
}
