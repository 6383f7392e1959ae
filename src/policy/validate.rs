//! Per-weekday overlap check for a device schedule.

use tracing::debug;

use super::entry::DeviceSchedule;
use super::error::PolicyError;
use crate::time::{TimeOfDayInterval, DAYS_PER_WEEK};

/// Merges every entry's intervals into one bucket per weekday and rejects
/// the schedule if two ranges in a bucket overlap.
///
/// Within a bucket sorted by start time, any overlap shows up between two
/// neighbours, so a single adjacent-pair scan is enough. Touching ranges
/// (`previous.end == next.start`) are allowed.
///
/// Complexity: O(k log k) for `k` intervals across the device's entries.
pub(crate) fn check_device(
    device: usize,
    name: &str,
    schedule: &DeviceSchedule,
) -> Result<(), PolicyError> {
    let mut buckets: [Vec<TimeOfDayInterval>; DAYS_PER_WEEK as usize] = Default::default();

    for entry in schedule.entries() {
        for day in entry.days().iter() {
            buckets[day as usize].extend_from_slice(entry.intervals());
        }
    }

    for (weekday, bucket) in buckets.iter_mut().enumerate() {
        bucket.sort_by_key(|iv| (iv.start(), iv.end()));
        if let Some(pair) = bucket.windows(2).find(|p| p[0].end() > p[1].start()) {
            return Err(PolicyError::Overlap {
                device,
                name: name.to_string(),
                weekday: weekday as u8,
                first: pair[0],
                second: pair[1],
            });
        }
    }

    debug!(
        device,
        device_name = name,
        intervals = buckets.iter().map(Vec::len).sum::<usize>(),
        "device schedule validated"
    );
    Ok(())
}
