//! Simulation surface consumed by a reinforcement-learning loop.
//!
//! [`ActionSpace`] enumerates the discrete toggle actions, [`transition::apply`]
//! moves a state forward, [`RewardScorer`] grades a state against the
//! schedule and [`Sampler`] draws episode starting points. The
//! [`ScheduleEnvironment`] strings them together into reset/step episodes.

pub mod action_space;
pub mod agent;
pub mod config;
pub mod environment;
pub mod metrics;
pub mod reward;
pub mod sampler;
pub mod transition;

pub use action_space::{ActionSpace, CapacityError, MAX_ACTION_DIM};
pub use agent::{Agent, RandomAgent, ScheduleAgent};
pub use config::EnvConfig;
pub use environment::{EnvironmentError, ScheduleEnvironment, StepResult};
pub use metrics::EvaluationMetrics;
pub use reward::RewardScorer;
pub use sampler::Sampler;
pub use transition::apply;
