//! Point-in-time expected state queries.

use super::Policy;
use crate::state::{DeviceFlags, StateVector};
use crate::time::PointInTime;
use crate::DeviceId;

impl Policy {
    /// Whether `device` should be on at `at`.
    ///
    /// Only the first entry (in declared order) whose days include the
    /// weekday is consulted; the device is on if any of that entry's
    /// intervals contains the time of day, endpoints included. Unknown
    /// devices and devices without entries are off.
    pub fn is_expected_on(&self, device: DeviceId, at: PointInTime) -> bool {
        let Some(entry) = self
            .schedule(device)
            .and_then(|s| s.entry_for(at.weekday()))
        else {
            return false;
        };
        let time = at.time_of_day();
        entry
            .intervals()
            .iter()
            .take_while(|iv| iv.start() <= time)
            .any(|iv| iv.contains(time))
    }

    /// Expected flag of every device at `at`, in device order.
    pub fn expected_flags(&self, at: PointInTime) -> DeviceFlags {
        (0..self.device_count())
            .map(|device| self.is_expected_on(device, at))
            .collect()
    }

    /// Expected state at `at`: the time components of `at` followed by the
    /// expected device flags.
    pub fn expected_state(&self, at: PointInTime) -> StateVector {
        StateVector::from_flags(at, &self.expected_flags(at))
    }
}
