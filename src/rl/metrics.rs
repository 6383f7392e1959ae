//! Evaluation metrics for the schedule environment.

use std::fmt;

use super::agent::Agent;
use super::environment::ScheduleEnvironment;

/// Aggregated evaluation metrics over multiple episodes.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationMetrics {
    /// Mean cumulative reward per episode.
    pub mean_cumulative_reward: f64,
    /// Mean reward per step across all episodes.
    pub mean_step_reward: f64,
    /// Fraction of steps on which every device matched the schedule.
    pub perfect_step_fraction: f64,
    /// Number of episodes evaluated.
    pub n_episodes: usize,
}

impl EvaluationMetrics {
    /// Runs `agent` for `n_episodes` full episodes and aggregates the rewards.
    pub fn evaluate(
        env: &mut ScheduleEnvironment,
        agent: &mut dyn Agent,
        n_episodes: usize,
    ) -> Self {
        let mut total_reward = 0.0;
        let mut steps = 0usize;
        let mut perfect_steps = 0usize;

        for _ in 0..n_episodes {
            let mut state = env.reset();
            loop {
                let action = agent.select_action(&state, env.action_space());
                let result = env.step(action);
                steps += 1;
                if result.reward >= 1.0 {
                    perfect_steps += 1;
                }
                state = result.state;
                if result.done {
                    total_reward += env.cumulative_reward;
                    break;
                }
            }
        }

        let per_step = |value: f64| if steps > 0 { value / steps as f64 } else { 0.0 };
        Self {
            mean_cumulative_reward: if n_episodes > 0 {
                total_reward / n_episodes as f64
            } else {
                0.0
            },
            mean_step_reward: per_step(total_reward),
            perfect_step_fraction: per_step(perfect_steps as f64),
            n_episodes,
        }
    }
}

impl fmt::Display for EvaluationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Evaluation Metrics ({} episodes) ===",
            self.n_episodes
        )?;
        writeln!(
            f,
            "  Mean cumulative reward:  {:.2}",
            self.mean_cumulative_reward
        )?;
        writeln!(f, "  Mean step reward:        {:.3}", self.mean_step_reward)?;
        writeln!(
            f,
            "  Perfect steps:           {:.1}%",
            self.perfect_step_fraction * 100.0
        )
    }
}
