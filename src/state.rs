//! State and action values exchanged with the training loop.
//!
//! Inside the crate, time and device state are kept apart: [`PointInTime`]
//! for the clock and [`DeviceFlags`] for on/off values, which are binary by
//! construction. They are joined into a [`StateVector`] only at the boundary.
//! A `StateVector` stores raw device levels because the toggle transition is
//! additive and may push a level past 1 when the caller breaks its contract.

use thiserror::Error;

use crate::time::{PointInTime, TIME_COMPONENTS, TIME_COMPONENT_COUNT};

/// On/off value of every device, in device order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DeviceFlags(Vec<bool>);

impl DeviceFlags {
    pub fn new(flags: Vec<bool>) -> Self {
        Self(flags)
    }

    pub fn all_off(device_count: usize) -> Self {
        Self(vec![false; device_count])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, device: usize) -> Option<bool> {
        self.0.get(device).copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    /// Number of devices whose flag differs from `other`.
    pub fn mismatches(&self, other: &DeviceFlags) -> usize {
        debug_assert_eq!(self.len(), other.len(), "flag vectors differ in length");
        self.iter().zip(other.iter()).filter(|(a, b)| a != b).count()
    }
}

impl FromIterator<bool> for DeviceFlags {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<bool>> for DeviceFlags {
    fn from(flags: Vec<bool>) -> Self {
        Self(flags)
    }
}

/// Per-device toggle instruction: `true` means "flip device i".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ActionVector(Vec<bool>);

impl ActionVector {
    pub fn new(toggles: Vec<bool>) -> Self {
        Self(toggles)
    }

    /// The no-op action.
    pub fn idle(device_count: usize) -> Self {
        Self(vec![false; device_count])
    }

    /// Toggles that turn `current` into `target`.
    pub fn correcting(current: &DeviceFlags, target: &DeviceFlags) -> Self {
        debug_assert_eq!(current.len(), target.len(), "flag vectors differ in length");
        current.iter().zip(target.iter()).map(|(c, t)| c != t).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn toggles(&self, device: usize) -> bool {
        self.0.get(device).copied().unwrap_or(false)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    /// Components as `0.0`/`1.0`, the encoding a network head consumes.
    pub fn to_features(&self) -> Vec<f32> {
        self.iter().map(|b| if b { 1.0 } else { 0.0 }).collect()
    }
}

impl FromIterator<bool> for ActionVector {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Errors decoding a flat numeric state vector.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("State vector has {actual} components, expected {expected}")]
    WrongLength { expected: usize, actual: usize },

    #[error("{component} component {value} is outside {min}..={max}")]
    TimeOutOfRange {
        component: &'static str,
        value: f32,
        min: u8,
        max: u8,
    },

    #[error("Device flag {device} is {value}, expected 0 or 1")]
    NonBinaryFlag { device: usize, value: f32 },
}

/// Time components followed by one level per device (dimension `3 + N`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateVector {
    time: PointInTime,
    levels: Vec<u32>,
}

impl StateVector {
    pub fn from_flags(time: PointInTime, flags: &DeviceFlags) -> Self {
        Self {
            time,
            levels: flags.iter().map(u32::from).collect(),
        }
    }

    /// Builds a state from raw device levels; nothing checks that they are binary.
    pub fn from_levels(time: PointInTime, levels: Vec<u32>) -> Self {
        Self { time, levels }
    }

    pub fn time(&self) -> PointInTime {
        self.time
    }

    pub fn levels(&self) -> &[u32] {
        &self.levels
    }

    pub fn device_count(&self) -> usize {
        self.levels.len()
    }

    /// Total number of components.
    pub fn dim(&self) -> usize {
        TIME_COMPONENT_COUNT + self.levels.len()
    }

    pub fn is_binary(&self) -> bool {
        self.levels.iter().all(|&l| l <= 1)
    }

    /// Device flags, or `None` if some level has left {0, 1}.
    pub fn flags(&self) -> Option<DeviceFlags> {
        self.is_binary()
            .then(|| self.levels.iter().map(|&l| l == 1).collect())
    }

    /// Reads each level as a count of toggles from off: odd means on.
    pub fn folded_flags(&self) -> DeviceFlags {
        self.levels.iter().map(|&l| l % 2 == 1).collect()
    }

    /// Same state with a different clock.
    pub fn with_time(&self, time: PointInTime) -> Self {
        Self {
            time,
            levels: self.levels.clone(),
        }
    }

    /// Flat `[weekday, hour, minute, level_0, .., level_{N-1}]` encoding.
    pub fn to_features(&self) -> Vec<f32> {
        self.time
            .components()
            .iter()
            .map(|&c| f32::from(c))
            .chain(self.levels.iter().map(|&l| l as f32))
            .collect()
    }

    /// Decodes the flat encoding produced by [`StateVector::to_features`].
    ///
    /// Time components must be whole numbers within their ranges and every
    /// device component must be exactly `0` or `1`.
    pub fn from_features(features: &[f32], device_count: usize) -> Result<Self, StateError> {
        let expected = TIME_COMPONENT_COUNT + device_count;
        if features.len() != expected {
            return Err(StateError::WrongLength {
                expected,
                actual: features.len(),
            });
        }

        let (time_part, device_part) = features.split_at(TIME_COMPONENT_COUNT);
        let mut components = [0u8; TIME_COMPONENT_COUNT];
        for ((slot, &value), (component, (min, max))) in components
            .iter_mut()
            .zip(time_part)
            .zip(TIME_COMPONENTS)
        {
            if value.fract() != 0.0 || value < f32::from(min) || value > f32::from(max) {
                return Err(StateError::TimeOutOfRange {
                    component,
                    value,
                    min,
                    max,
                });
            }
            *slot = value as u8;
        }
        let [weekday, hour, minute] = components;
        let (component, (min, max)) = TIME_COMPONENTS[0];
        let time = PointInTime::new(weekday, hour, minute).ok_or(StateError::TimeOutOfRange {
            component,
            value: time_part[0],
            min,
            max,
        })?;

        let levels = device_part
            .iter()
            .enumerate()
            .map(|(device, &value)| match value {
                v if v == 0.0 => Ok(0),
                v if v == 1.0 => Ok(1),
                _ => Err(StateError::NonBinaryFlag { device, value }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { time, levels })
    }
}
