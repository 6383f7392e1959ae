//! Minute-resolution clock model for a repeating week.
//!
//! Weekday `0` is Monday. A [`PointInTime`] is the `(weekday, hour, minute)`
//! triple carried at the head of every state vector; [`TimeOfDay`] is the
//! clock part alone, used by schedule intervals.

pub mod interval;

pub use interval::TimeOfDayInterval;

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

pub const DAYS_PER_WEEK: u8 = 7;
pub const MINUTES_PER_HOUR: u16 = 60;
pub const MINUTES_PER_DAY: u16 = 24 * MINUTES_PER_HOUR;
pub const MINUTES_PER_WEEK: u32 = DAYS_PER_WEEK as u32 * MINUTES_PER_DAY as u32;

/// Smallest step of simulated time, in minutes.
pub const MIN_TIME_UNIT_MINUTES: u32 = 1;

/// Time components of a state vector in encoding order, with inclusive ranges.
pub const TIME_COMPONENTS: [(&str, (u8, u8)); 3] = [
    ("Weekday", (0, DAYS_PER_WEEK - 1)),
    ("Hour", (0, 23)),
    ("Minute", (0, 59)),
];

/// Number of leading time components in a state vector.
pub const TIME_COMPONENT_COUNT: usize = TIME_COMPONENTS.len();

const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK as usize] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Calendar anchor for the simulated week: 2018-02-05 was a Monday, so the
/// day of month and the weekday index advance together.
fn week_anchor() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2018, 2, 5)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Clock time within one day, in whole minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const LAST_MINUTE: TimeOfDay = TimeOfDay(MINUTES_PER_DAY - 1);

    /// Returns `None` if `hour > 23` or `minute > 59`.
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour as u16 * MINUTES_PER_HOUR + minute as u16))
        } else {
            None
        }
    }

    pub const fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < MINUTES_PER_DAY {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Converts a `chrono` clock time. Sub-minute precision is not
    /// representable and yields `None`.
    pub fn from_naive_time(time: NaiveTime) -> Option<Self> {
        if time.second() != 0 || time.nanosecond() != 0 {
            return None;
        }
        Self::new(time.hour() as u8, time.minute() as u8)
    }

    pub const fn minutes(&self) -> u16 {
        self.0
    }

    pub const fn hour(&self) -> u8 {
        (self.0 / MINUTES_PER_HOUR) as u8
    }

    pub const fn minute(&self) -> u8 {
        (self.0 % MINUTES_PER_HOUR) as u8
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A minute within the repeating week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PointInTime {
    weekday: u8,
    hour: u8,
    minute: u8,
}

impl PointInTime {
    /// Returns `None` if any component is outside its [`TIME_COMPONENTS`] range.
    pub const fn new(weekday: u8, hour: u8, minute: u8) -> Option<Self> {
        if weekday < DAYS_PER_WEEK && hour < 24 && minute < 60 {
            Some(Self {
                weekday,
                hour,
                minute,
            })
        } else {
            None
        }
    }

    /// Combines a weekday with a clock time.
    pub const fn at(weekday: u8, time: TimeOfDay) -> Option<Self> {
        Self::new(weekday, time.hour(), time.minute())
    }

    pub const fn weekday(&self) -> u8 {
        self.weekday
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay(self.hour as u16 * MINUTES_PER_HOUR + self.minute as u16)
    }

    /// Minutes elapsed since Monday 00:00.
    pub const fn minute_of_week(&self) -> u32 {
        self.weekday as u32 * MINUTES_PER_DAY as u32 + self.time_of_day().0 as u32
    }

    /// Builds a point from minutes since Monday 00:00, wrapping at the week.
    pub const fn from_minute_of_week(minutes: u32) -> Self {
        let minutes = minutes % MINUTES_PER_WEEK;
        let day_minutes = (minutes % MINUTES_PER_DAY as u32) as u16;
        Self {
            weekday: (minutes / MINUTES_PER_DAY as u32) as u8,
            hour: (day_minutes / MINUTES_PER_HOUR) as u8,
            minute: (day_minutes % MINUTES_PER_HOUR) as u8,
        }
    }

    /// Moves forward by `minutes`, wrapping from Sunday night into Monday.
    pub const fn advance(self, minutes: u32) -> Self {
        let offset = minutes % MINUTES_PER_WEEK;
        Self::from_minute_of_week(self.minute_of_week() + offset)
    }

    /// Components in state-vector order: `[weekday, hour, minute]`.
    pub const fn components(&self) -> [u8; TIME_COMPONENT_COUNT] {
        [self.weekday, self.hour, self.minute]
    }

    /// Calendar date-time of this point within the anchor week
    /// (Monday 2018-02-05 .. Sunday 2018-02-11).
    pub fn to_datetime(&self) -> NaiveDateTime {
        week_anchor() + TimeDelta::minutes(i64::from(self.minute_of_week()))
    }

    /// Projects any calendar date-time onto the repeating week, dropping seconds.
    pub fn from_datetime(datetime: &NaiveDateTime) -> Self {
        Self {
            weekday: datetime.weekday().num_days_from_monday() as u8,
            hour: datetime.hour() as u8,
            minute: datetime.minute() as u8,
        }
    }
}

impl fmt::Display for PointInTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            WEEKDAY_NAMES[self.weekday as usize],
            self.time_of_day()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_of_day_rejects_out_of_range() {
        assert!(TimeOfDay::new(24, 0).is_none());
        assert!(TimeOfDay::new(23, 60).is_none());
        assert_eq!(TimeOfDay::new(23, 59), Some(TimeOfDay::LAST_MINUTE));
        assert!(TimeOfDay::from_minutes(MINUTES_PER_DAY).is_none());
    }

    #[test]
    fn time_of_day_orders_by_clock_value() {
        let early = TimeOfDay::new(9, 5).unwrap();
        let late = TimeOfDay::new(10, 0).unwrap();
        assert!(early < late);
        assert_eq!(early.hour(), 9);
        assert_eq!(early.minute(), 5);
    }

    #[test]
    fn from_naive_time_rejects_seconds() {
        let exact = NaiveTime::from_hms_opt(8, 30, 0).unwrap();
        let with_seconds = NaiveTime::from_hms_opt(8, 30, 15).unwrap();
        assert_eq!(TimeOfDay::from_naive_time(exact), TimeOfDay::new(8, 30));
        assert!(TimeOfDay::from_naive_time(with_seconds).is_none());
    }

    #[test]
    fn point_in_time_validates_components() {
        assert!(PointInTime::new(7, 0, 0).is_none());
        assert!(PointInTime::new(0, 24, 0).is_none());
        assert!(PointInTime::new(0, 0, 60).is_none());
        assert!(PointInTime::new(6, 23, 59).is_some());
    }

    #[test]
    fn advance_wraps_around_the_week() {
        let sunday_night = PointInTime::new(6, 23, 59).unwrap();
        assert_eq!(sunday_night.advance(1), PointInTime::new(0, 0, 0).unwrap());
        assert_eq!(sunday_night.advance(MINUTES_PER_WEEK), sunday_night);

        let monday = PointInTime::new(0, 8, 45).unwrap();
        assert_eq!(monday.advance(30), PointInTime::new(0, 9, 15).unwrap());
    }

    #[test]
    fn minute_of_week_round_trips_every_day_boundary() {
        for weekday in 0..DAYS_PER_WEEK {
            let start = PointInTime::new(weekday, 0, 0).unwrap();
            assert_eq!(PointInTime::from_minute_of_week(start.minute_of_week()), start);
        }
    }

    #[test]
    fn datetime_bridge_keeps_weekday_alignment() {
        let wednesday = PointInTime::new(2, 18, 20).unwrap();
        let datetime = wednesday.to_datetime();
        assert_eq!(datetime.day(), 7);
        assert_eq!(datetime.weekday(), chrono::Weekday::Wed);
        assert_eq!(PointInTime::from_datetime(&datetime), wednesday);
    }

    #[test]
    fn display_names_the_weekday() {
        let p = PointInTime::new(5, 7, 3).unwrap();
        assert_eq!(p.to_string(), "Sat 07:03");
    }

    #[test]
    fn components_are_in_state_order() {
        let p = PointInTime::new(4, 13, 37).unwrap();
        assert_eq!(p.components(), [4, 13, 37]);
    }
}
