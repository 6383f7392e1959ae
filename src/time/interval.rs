//! Closed time-of-day ranges used by device schedules.

use std::fmt::Display;

use qtty::{Minute, Quantity};

use super::TimeOfDay;

/// Closed range `[start, end]` within a single calendar day.
///
/// Ranges never wrap around midnight, so `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeOfDayInterval {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeOfDayInterval {
    /// Creates interval `[start, end]`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub const fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        assert!(
            start.minutes() <= end.minutes(),
            "Interval start must be <= end"
        );
        Self { start, end }
    }

    /// Creates interval `[start, end]`, or `None` when `start > end`.
    pub const fn checked(start: TimeOfDay, end: TimeOfDay) -> Option<Self> {
        if start.minutes() <= end.minutes() {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub const fn start(&self) -> TimeOfDay {
        self.start
    }

    pub const fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Length of the range in minutes.
    pub fn duration(&self) -> Quantity<Minute> {
        Quantity::new(f64::from(self.end.minutes() - self.start.minutes()))
    }

    /// Returns true if `time` ∈ `[start, end]` (both ends inclusive).
    pub const fn contains(&self, time: TimeOfDay) -> bool {
        self.start.minutes() <= time.minutes() && time.minutes() <= self.end.minutes()
    }

    /// Returns true if the two ranges share more than a single endpoint.
    ///
    /// Touching ranges (`self.end == other.start`) do not overlap.
    pub const fn overlaps(&self, other: &TimeOfDayInterval) -> bool {
        self.start.minutes() < other.end.minutes() && other.start.minutes() < self.end.minutes()
    }
}

impl Display for TimeOfDayInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
