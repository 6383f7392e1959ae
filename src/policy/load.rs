//! Building a [`Policy`] from a schedule document.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::format::{parse, Parsed, StrftimeItems};
use tracing::{info, warn};

use super::document::{DaySpec, RawEntry, ScheduleDocument, Section};
use super::entry::{DeviceSchedule, ScheduleEntry, WeekdaySet};
use super::error::PolicyError;
use super::validate;
use super::Policy;
use crate::time::{TimeOfDay, TimeOfDayInterval};

impl Policy {
    /// Reads and validates a JSON schedule file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| PolicyError::Io(format!("{}: {}", path.display(), e)))?;
        let policy = Self::from_reader(BufReader::new(file))?;
        info!(
            path = %path.display(),
            devices = policy.device_count(),
            "schedule loaded"
        );
        Ok(policy)
    }

    /// Reads and validates a JSON schedule from any byte stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PolicyError> {
        let document: ScheduleDocument =
            serde_json::from_reader(reader).map_err(PolicyError::from_json)?;
        Self::from_document(document)
    }

    /// Parses and validates a JSON schedule held in memory.
    pub fn from_json_str(source: &str) -> Result<Self, PolicyError> {
        let document: ScheduleDocument =
            serde_json::from_str(source).map_err(PolicyError::from_json)?;
        Self::from_document(document)
    }

    /// Builds a policy from an already deserialized document.
    ///
    /// Resolves aliases (one lookup, never recursive), parses every time
    /// string under the document's time format, and runs the per-weekday
    /// overlap check for each device.
    pub fn from_document(document: ScheduleDocument) -> Result<Self, PolicyError> {
        let ScheduleDocument {
            devices,
            time_format,
            days,
            sections,
        } = document;

        if devices.is_empty() {
            return Err(PolicyError::schema("`Devices` must name at least one device"));
        }
        let weekdays = canonical_weekdays(&days)?;

        let mut blocks: BTreeMap<usize, serde_json::Value> = BTreeMap::new();
        let mut aliases: BTreeMap<String, WeekdaySet> = BTreeMap::new();
        for (key, value) in sections {
            match Section::classify(key, value) {
                Section::Device(index, value) => {
                    if index >= devices.len() {
                        return Err(PolicyError::schema(format!(
                            "schedule block `{}` has no matching device ({} declared)",
                            index,
                            devices.len()
                        )));
                    }
                    if blocks.insert(index, value).is_some() {
                        return Err(PolicyError::schema(format!(
                            "device [{}] has more than one schedule block (index {})",
                            devices[index], index
                        )));
                    }
                }
                Section::Alias(name, value) => {
                    let days = parse_alias(&name, value, weekdays)?;
                    aliases.insert(name, days);
                }
            }
        }

        let mut schedules = Vec::with_capacity(devices.len());
        let mut entry_count = 0;
        for (device, name) in devices.iter().enumerate() {
            let block = blocks.remove(&device).ok_or_else(|| {
                PolicyError::schema(format!("missing schedule block `{}` for device [{}]", device, name))
            })?;
            let raw: Vec<RawEntry> = serde_json::from_value(block).map_err(|e| {
                PolicyError::schema(format!("schedule block `{}` ({}): {}", device, name, e))
            })?;
            if raw.is_empty() {
                warn!(device, device_name = %name, "device has no schedule entries and is always off");
            }

            let entries = raw
                .into_iter()
                .map(|entry| build_entry(device, name, entry, &time_format, weekdays, &aliases))
                .collect::<Result<Vec<_>, _>>()?;
            entry_count += entries.len();

            let schedule = DeviceSchedule::new(entries);
            validate::check_device(device, name, &schedule)?;
            schedules.push(schedule);
        }

        info!(
            devices = devices.len(),
            entries = entry_count,
            aliases = aliases.len(),
            "schedule validated"
        );

        Ok(Policy {
            device_names: devices,
            time_format,
            weekdays,
            aliases,
            schedules,
        })
    }
}

fn canonical_weekdays(days: &[u8]) -> Result<WeekdaySet, PolicyError> {
    let mut set = WeekdaySet::EMPTY;
    for &day in days {
        if !set.insert(day) {
            return Err(PolicyError::schema(format!(
                "`days` contains {}, weekdays must be in 0..=6",
                day
            )));
        }
    }
    if set.is_empty() {
        return Err(PolicyError::schema("`days` must list at least one weekday"));
    }
    Ok(set)
}

fn parse_alias(
    name: &str,
    value: serde_json::Value,
    weekdays: WeekdaySet,
) -> Result<WeekdaySet, PolicyError> {
    let days: Vec<u8> = serde_json::from_value(value).map_err(|_| {
        PolicyError::schema(format!(
            "alias `{}` must be a list of weekday indices",
            name
        ))
    })?;
    check_days(&days, weekdays, || format!("alias `{}`", name))
}

fn check_days(
    days: &[u8],
    weekdays: WeekdaySet,
    context: impl Fn() -> String,
) -> Result<WeekdaySet, PolicyError> {
    if let Some(day) = days.iter().find(|d| !weekdays.contains(**d)) {
        return Err(PolicyError::schema(format!(
            "{} references weekday {} which is not declared in `days`",
            context(),
            day
        )));
    }
    Ok(days.iter().copied().collect())
}

fn build_entry(
    device: usize,
    name: &str,
    raw: RawEntry,
    time_format: &str,
    weekdays: WeekdaySet,
    aliases: &BTreeMap<String, WeekdaySet>,
) -> Result<ScheduleEntry, PolicyError> {
    let days = match raw.days {
        DaySpec::Weekdays(list) => check_days(&list, weekdays, || {
            format!("an entry of device [{}]", name)
        })?,
        DaySpec::Alias(alias) => *aliases.get(&alias).ok_or_else(|| {
            PolicyError::schema(format!(
                "device [{}] uses unknown day-group alias `{}`",
                name, alias
            ))
        })?,
    };

    let intervals = raw
        .times
        .into_iter()
        .map(|(start, end)| {
            let from = parse_time(&start, time_format)?;
            let to = parse_time(&end, time_format)?;
            TimeOfDayInterval::checked(from, to).ok_or_else(|| PolicyError::InvertedInterval {
                device,
                name: name.to_string(),
                start: from,
                end: to,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ScheduleEntry::new(days, intervals))
}

/// Parses a clock-time string under a strftime-style pattern.
///
/// Fields the pattern does not mention default to zero, so `%H` reads `"08"`
/// as 08:00.
fn parse_time(value: &str, format: &str) -> Result<TimeOfDay, PolicyError> {
    let format_error = || PolicyError::Format {
        value: value.to_string(),
        format: format.to_string(),
    };
    let mut parsed = Parsed::new();
    parse(&mut parsed, value, StrftimeItems::new(format)).map_err(|_| format_error())?;
    if parsed.minute.is_none() {
        parsed.set_minute(0).map_err(|_| format_error())?;
    }
    parsed
        .to_naive_time()
        .ok()
        .and_then(TimeOfDay::from_naive_time)
        .ok_or_else(format_error)
}
