//! Schedule-matching reward.

use crate::policy::Policy;
use crate::state::StateVector;
use crate::time::PointInTime;

/// Scores observed device states against the schedule.
pub struct RewardScorer;

impl RewardScorer {
    /// Reward in `[-1, 1]` for `observed` at `at`.
    ///
    /// ```text
    /// mistakes = Σ_i |observed_i - expected_i|
    /// reward   = (N - 2 · mistakes) / N
    /// ```
    ///
    /// 1 when every device matches the schedule, -1 when none do, linear in
    /// the number of mistakes in between. `observed` must be binary.
    pub fn score(policy: &Policy, observed: &StateVector, at: PointInTime) -> f64 {
        debug_assert!(observed.is_binary(), "scored state must be binary");
        debug_assert_eq!(observed.device_count(), policy.device_count());

        let expected = policy.expected_flags(at);
        let mistakes: u32 = observed
            .levels()
            .iter()
            .zip(expected.iter())
            .map(|(&level, on)| level.abs_diff(u32::from(on)))
            .sum();
        Self::from_mistakes(mistakes as usize, policy.device_count())
    }

    /// `(correct - mistakes) / device_count`.
    pub fn from_mistakes(mistakes: usize, device_count: usize) -> f64 {
        let n = device_count as f64;
        let mistakes = mistakes as f64;
        let correct = n - mistakes;
        (correct - mistakes) / n
    }

    /// Every reward value reachable with `device_count` devices, from -1 up to 1.
    pub fn reward_levels(device_count: usize) -> Vec<f64> {
        (0..=device_count)
            .rev()
            .map(|mistakes| Self::from_mistakes(mistakes, device_count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DeviceFlags;

    fn four_lamps() -> Policy {
        Policy::from_json_str(
            r#"{
                "Devices": ["A", "B", "C", "D"],
                "Time format": "%H:%M",
                "days": [0, 1, 2, 3, 4, 5, 6],
                "0": [{"days": [0], "times": [["08:00", "10:00"]]}],
                "1": [{"days": [0], "times": [["08:00", "10:00"]]}],
                "2": [],
                "3": []
            }"#,
        )
        .unwrap()
    }

    fn monday_nine() -> PointInTime {
        PointInTime::new(0, 9, 0).unwrap()
    }

    fn observed(flags: &[bool]) -> StateVector {
        StateVector::from_flags(monday_nine(), &DeviceFlags::new(flags.to_vec()))
    }

    #[test]
    fn all_matching_scores_one() {
        let policy = four_lamps();
        let reward = RewardScorer::score(&policy, &observed(&[true, true, false, false]), monday_nine());
        assert_eq!(reward, 1.0);
    }

    #[test]
    fn all_mismatching_scores_minus_one() {
        let policy = four_lamps();
        let reward = RewardScorer::score(&policy, &observed(&[false, false, true, true]), monday_nine());
        assert_eq!(reward, -1.0);
    }

    #[test]
    fn one_mistake_of_four_scores_half() {
        let policy = four_lamps();
        let reward = RewardScorer::score(&policy, &observed(&[true, false, false, false]), monday_nine());
        assert_eq!(reward, 0.5);
    }

    #[test]
    fn expected_state_always_scores_one() {
        let policy = four_lamps();
        for hour in 0..24 {
            let at = PointInTime::new(0, hour, 0).unwrap();
            assert_eq!(RewardScorer::score(&policy, &policy.expected_state(at), at), 1.0);
        }
    }

    #[test]
    fn reward_levels_are_evenly_spaced() {
        assert_eq!(RewardScorer::reward_levels(4), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        for n in 1..8 {
            let levels = RewardScorer::reward_levels(n);
            assert_eq!(levels.len(), n + 1);
            for pair in levels.windows(2) {
                assert!((pair[1] - pair[0] - 2.0 / n as f64).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn reward_decreases_with_mistakes() {
        for mistakes in 0..5 {
            assert!(
                RewardScorer::from_mistakes(mistakes + 1, 5) < RewardScorer::from_mistakes(mistakes, 5)
            );
        }
    }
}
