//! Random starting points for simulation episodes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::state::{DeviceFlags, StateVector};
use crate::time::{PointInTime, MINUTES_PER_WEEK};

/// Draws random points in time and random device states.
///
/// The random source is injected, so a seeded sampler is fully reproducible.
/// Device flags are drawn independently of the schedule.
#[derive(Debug, Clone)]
pub struct Sampler<R: Rng> {
    rng: R,
    device_count: usize,
}

impl Sampler<StdRng> {
    /// Sampler backed by a `StdRng` seeded with `seed`.
    pub fn seeded(device_count: usize, seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), device_count)
    }
}

impl<R: Rng> Sampler<R> {
    pub fn new(rng: R, device_count: usize) -> Self {
        Self { rng, device_count }
    }

    pub fn device_count(&self) -> usize {
        self.device_count
    }

    /// Weekday, hour and minute drawn uniformly and independently.
    pub fn random_point_in_time(&mut self) -> PointInTime {
        // A uniform minute of the week is the same as three independent uniform components.
        PointInTime::from_minute_of_week(self.rng.gen_range(0..MINUTES_PER_WEEK))
    }

    /// One fair coin flip per device.
    pub fn random_flags(&mut self) -> DeviceFlags {
        (0..self.device_count).map(|_| self.rng.gen_bool(0.5)).collect()
    }

    /// A random point in time with random device flags.
    pub fn random_state(&mut self) -> StateVector {
        let time = self.random_point_in_time();
        StateVector::from_flags(time, &self.random_flags())
    }

    /// Uniform index into a space of `len` actions.
    pub fn random_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}
