use thiserror::Error;

use crate::time::{TimeOfDay, TimeOfDayInterval};

/// Errors raised while building a [`Policy`](super::Policy).
///
/// Every variant aborts construction; no partially loaded policy is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Malformed schedule: {0}")]
    Schema(String),

    #[error("Cannot parse time `{value}` with format `{format}`")]
    Format { value: String, format: String },

    #[error(
        "Validation failed for device [{name}], ID:[{device}], weekday {weekday}: \
         time ranges {first} - {second} overlap"
    )]
    Overlap {
        device: usize,
        name: String,
        weekday: u8,
        first: TimeOfDayInterval,
        second: TimeOfDayInterval,
    },

    #[error("Validation failed for device [{name}], ID:[{device}]: range {start} - {end} ends before it starts")]
    InvertedInterval {
        device: usize,
        name: String,
        start: TimeOfDay,
        end: TimeOfDay,
    },

    #[error("Cannot read schedule: {0}")]
    Io(String),
}

impl PolicyError {
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        PolicyError::Schema(message.into())
    }

    /// Maps a deserializer failure: I/O problems stay I/O, everything else is
    /// a structural problem with the document.
    pub(crate) fn from_json(err: serde_json::Error) -> Self {
        if err.is_io() {
            PolicyError::Io(err.to_string())
        } else {
            PolicyError::Schema(err.to_string())
        }
    }

    /// True for the overlap and inverted-range checks run after parsing.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PolicyError::Overlap { .. } | PolicyError::InvertedInterval { .. }
        )
    }
}
