use std::fmt;

use crate::time::{TimeOfDayInterval, DAYS_PER_WEEK};

/// Set of weekdays (`0` = Monday .. `6` = Sunday) stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);
    pub const ALL: WeekdaySet = WeekdaySet((1 << DAYS_PER_WEEK) - 1);

    /// Adds `weekday`. Returns false if it is not a valid weekday index.
    pub fn insert(&mut self, weekday: u8) -> bool {
        if weekday >= DAYS_PER_WEEK {
            return false;
        }
        self.0 |= 1 << weekday;
        true
    }

    pub const fn contains(&self, weekday: u8) -> bool {
        weekday < DAYS_PER_WEEK && self.0 & (1 << weekday) != 0
    }

    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Weekdays in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..DAYS_PER_WEEK).filter(move |d| self.contains(*d))
    }
}

impl FromIterator<u8> for WeekdaySet {
    /// Out-of-range values are dropped.
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = WeekdaySet::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days: Vec<String> = self.iter().map(|d| d.to_string()).collect();
        write!(f, "{{{}}}", days.join(", "))
    }
}

/// One `{days, intervals}` rule of a device schedule, aliases already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    days: WeekdaySet,
    intervals: Vec<TimeOfDayInterval>,
}

impl ScheduleEntry {
    /// Creates an entry; intervals are sorted by start time.
    pub fn new(days: WeekdaySet, mut intervals: Vec<TimeOfDayInterval>) -> Self {
        intervals.sort_by_key(|iv| (iv.start(), iv.end()));
        Self { days, intervals }
    }

    pub fn days(&self) -> WeekdaySet {
        self.days
    }

    /// Intervals sorted by start time.
    pub fn intervals(&self) -> &[TimeOfDayInterval] {
        &self.intervals
    }
}

/// Ordered schedule entries of a single device.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceSchedule {
    entries: Vec<ScheduleEntry>,
}

impl DeviceSchedule {
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first entry, in declared order, that covers `weekday`.
    pub fn entry_for(&self, weekday: u8) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.days.contains(weekday))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimeOfDay;

    fn iv(start: u8, end: u8) -> TimeOfDayInterval {
        TimeOfDayInterval::new(
            TimeOfDay::new(start, 0).unwrap(),
            TimeOfDay::new(end, 0).unwrap(),
        )
    }

    #[test]
    fn weekday_set_membership() {
        let set: WeekdaySet = [0, 2, 4].into_iter().collect();
        assert!(set.contains(0));
        assert!(!set.contains(1));
        assert!(!set.contains(9));
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 2, 4]);
        assert_eq!(set.to_string(), "{0, 2, 4}");
    }

    #[test]
    fn weekday_set_rejects_invalid_day() {
        let mut set = WeekdaySet::EMPTY;
        assert!(!set.insert(7));
        assert!(set.is_empty());
        assert_eq!(WeekdaySet::ALL.len(), 7);
    }

    #[test]
    fn entry_sorts_intervals_by_start() {
        let entry = ScheduleEntry::new(WeekdaySet::ALL, vec![iv(18, 20), iv(6, 7), iv(12, 13)]);
        let starts: Vec<u8> = entry.intervals().iter().map(|i| i.start().hour()).collect();
        assert_eq!(starts, vec![6, 12, 18]);
    }

    #[test]
    fn entry_for_returns_first_declared_match() {
        let weekend: WeekdaySet = [5, 6].into_iter().collect();
        let sunday: WeekdaySet = [6].into_iter().collect();
        let schedule = DeviceSchedule::new(vec![
            ScheduleEntry::new(weekend, vec![iv(9, 10)]),
            ScheduleEntry::new(sunday, vec![iv(20, 21)]),
        ]);

        let first = schedule.entry_for(6).unwrap();
        assert_eq!(first.intervals(), &[iv(9, 10)]);
        assert!(schedule.entry_for(0).is_none());
    }
}
