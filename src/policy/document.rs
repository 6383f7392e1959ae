//! Serialized form of a schedule file.
//!
//! The document mirrors the on-disk layout: a handful of reserved top-level
//! keys, one block per device keyed by its ordinal (`"0"`, `"1"`, ...), and
//! any other key naming a day-group alias.
//!
//! ```json
//! {
//!   "Devices": ["Hallway light", "Boiler"],
//!   "Time format": "%H:%M",
//!   "days": [0, 1, 2, 3, 4, 5, 6],
//!   "weekdays": [0, 1, 2, 3, 4],
//!   "0": [{ "days": "weekdays", "times": [["06:30", "07:15"]] }],
//!   "1": [{ "days": [5, 6], "times": [["08:00", "08:45"]] }]
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level schedule document.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScheduleDocument {
    /// Ordered device names; a device's ordinal is its index here.
    #[serde(rename = "Devices")]
    pub devices: Vec<String>,

    /// strftime-style pattern for every clock-time string in the document.
    #[serde(rename = "Time format")]
    pub time_format: String,

    /// Canonical weekday indices a schedule entry may reference.
    pub days: Vec<u8>,

    /// Device blocks and day-group aliases, told apart by key.
    #[serde(flatten)]
    pub sections: BTreeMap<String, serde_json::Value>,
}

/// One `{days, times}` object inside a device block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawEntry {
    pub days: DaySpec,
    pub times: Vec<(String, String)>,
}

/// The `days` field of an entry: explicit weekdays or an alias name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DaySpec {
    Weekdays(Vec<u8>),
    Alias(String),
}

/// A top-level section after classification by key.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Section {
    Device(usize, serde_json::Value),
    Alias(String, serde_json::Value),
}

impl Section {
    pub(crate) fn classify(key: String, value: serde_json::Value) -> Self {
        if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = key.parse() {
                return Section::Device(index, value);
            }
        }
        Section::Alias(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_reserved_keys_and_sections() {
        let doc: ScheduleDocument = serde_json::from_str(
            r#"{
                "Devices": ["Lamp"],
                "Time format": "%H:%M",
                "days": [0, 1, 2, 3, 4, 5, 6],
                "weekend": [5, 6],
                "0": [{"days": "weekend", "times": [["09:00", "10:00"]]}]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.devices, vec!["Lamp".to_string()]);
        assert_eq!(doc.time_format, "%H:%M");
        assert_eq!(doc.sections.len(), 2);
        assert!(doc.sections.contains_key("weekend"));
        assert!(doc.sections.contains_key("0"));
    }

    #[test]
    fn day_spec_accepts_list_or_alias() {
        let list: RawEntry =
            serde_json::from_str(r#"{"days": [0, 2], "times": [["08:00", "09:00"]]}"#).unwrap();
        assert_eq!(list.days, DaySpec::Weekdays(vec![0, 2]));
        assert_eq!(list.times, vec![("08:00".to_string(), "09:00".to_string())]);

        let alias: RawEntry = serde_json::from_str(r#"{"days": "weekdays", "times": []}"#).unwrap();
        assert_eq!(alias.days, DaySpec::Alias("weekdays".into()));
    }

    #[test]
    fn missing_devices_is_an_error() {
        let result: Result<ScheduleDocument, _> =
            serde_json::from_str(r#"{"Time format": "%H:%M", "days": [0]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn classify_splits_numeric_keys_from_aliases() {
        let v = serde_json::Value::Null;
        assert_eq!(
            Section::classify("12".into(), v.clone()),
            Section::Device(12, v.clone())
        );
        assert_eq!(
            Section::classify("weekdays".into(), v.clone()),
            Section::Alias("weekdays".into(), v.clone())
        );
        assert_eq!(
            Section::classify("-1".into(), v.clone()),
            Section::Alias("-1".into(), v)
        );
    }
}
