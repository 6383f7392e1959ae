use std::collections::BTreeMap;

use qtty::{Hour, Minute, Quantity};

use crate::time::{DAYS_PER_WEEK, MIN_TIME_UNIT_MINUTES, TIME_COMPONENT_COUNT};
use crate::DeviceId;

pub mod document;
pub mod entry;
pub mod error;
mod load;
mod resolve;
mod validate;

pub use document::{DaySpec, RawEntry, ScheduleDocument};
pub use entry::{DeviceSchedule, ScheduleEntry, WeekdaySet};
pub use error::PolicyError;


/// Immutable weekly on/off schedule for a fixed set of devices.
///
/// A `Policy` is built once from a schedule document and never changes
/// afterwards; a schedule change means loading a new `Policy`. It is `Send +
/// Sync` and is meant to be shared (typically behind an `Arc`) by every
/// simulation worker.
///
/// # Guarantees
/// - at least one device, and exactly one [`DeviceSchedule`] per device name
/// - day-group aliases are already expanded into explicit [`WeekdaySet`]s
/// - for every device and weekday, the union of the device's intervals is
///   pairwise non-overlapping (touching endpoints allowed)
///
/// # Examples
///
/// ```
/// use hearth::policy::Policy;
/// use hearth::time::PointInTime;
///
/// let policy = Policy::from_json_str(r#"{
///     "Devices": ["Desk lamp"],
///     "Time format": "%H:%M",
///     "days": [0, 1, 2, 3, 4, 5, 6],
///     "0": [{"days": [0], "times": [["08:00", "10:00"]]}]
/// }"#).unwrap();
///
/// let monday_nine = PointInTime::new(0, 9, 0).unwrap();
/// assert_eq!(policy.expected_flags(monday_nine).as_slice(), &[true]);
/// assert_eq!(policy.state_dim(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    device_names: Vec<String>,
    time_format: String,
    weekdays: WeekdaySet,
    aliases: BTreeMap<String, WeekdaySet>,
    schedules: Vec<DeviceSchedule>,
}

impl Policy {
    pub fn device_count(&self) -> usize {
        self.device_names.len()
    }

    pub fn device_names(&self) -> &[String] {
        &self.device_names
    }

    pub fn device_name(&self, device: DeviceId) -> Option<&str> {
        self.device_names.get(device).map(String::as_str)
    }

    /// Pattern every clock-time string in the source document was parsed with.
    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    /// Canonical weekdays declared by the document.
    pub fn weekdays(&self) -> WeekdaySet {
        self.weekdays
    }

    /// Day-group aliases as resolved at load time.
    pub fn aliases(&self) -> &BTreeMap<String, WeekdaySet> {
        &self.aliases
    }

    pub fn schedule(&self, device: DeviceId) -> Option<&DeviceSchedule> {
        self.schedules.get(device)
    }

    /// Length of a state vector: time components followed by one flag per device.
    pub fn state_dim(&self) -> usize {
        TIME_COMPONENT_COUNT + self.device_count()
    }

    /// Length of an action vector: one toggle per device.
    pub fn action_dim(&self) -> usize {
        self.device_count()
    }

    /// Total time per week during which `device` is expected to be on.
    ///
    /// Each weekday contributes the intervals of the first entry covering it,
    /// matching how expected states are resolved. Intervals are closed at
    /// minute resolution, so `[22:00, 23:59]` counts as two hours.
    pub fn weekly_on_time(&self, device: DeviceId) -> Option<Quantity<Hour>> {
        let schedule = self.schedules.get(device)?;
        let tick = Quantity::<Minute>::new(f64::from(MIN_TIME_UNIT_MINUTES));
        let minutes = (0..DAYS_PER_WEEK)
            .filter_map(|day| schedule.entry_for(day))
            .flat_map(|entry| entry.intervals().iter().map(|iv| iv.duration() + tick))
            .fold(Quantity::<Minute>::new(0.0), |acc, d| acc + d);
        Some(minutes.to())
    }
}
