//! Configuration for the schedule-following environment.

use crate::time::MIN_TIME_UNIT_MINUTES;

/// Episode shape and randomness for [`ScheduleEnvironment`](super::ScheduleEnvironment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    /// Steps per episode.
    pub episode_horizon: u32,
    /// Simulated minutes between two consecutive states.
    pub minutes_per_step: u32,
    /// Seed for episode starting states.
    pub seed: u64,
}

impl EnvConfig {
    /// Simulated minutes covered by one full episode.
    pub fn episode_minutes(&self) -> u64 {
        u64::from(self.episode_horizon) * u64::from(self.minutes_per_step)
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            episode_horizon: 60,
            minutes_per_step: MIN_TIME_UNIT_MINUTES,
            seed: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = EnvConfig::default();
        assert!(cfg.episode_horizon > 0);
        assert_eq!(cfg.minutes_per_step, 1);
        assert_eq!(cfg.episode_minutes(), 60);
    }

    #[test]
    fn episode_minutes_scales_with_step() {
        let cfg = EnvConfig {
            episode_horizon: 96,
            minutes_per_step: 15,
            ..EnvConfig::default()
        };
        assert_eq!(cfg.episode_minutes(), 24 * 60);
    }
}
