//! Time-of-day values.
//!
//! Comparisons use minutes since midnight. Two renderings exist at the
//! boundary: the unpadded run-time token (`"9:5"`) and the zero-padded form
//! stored on schedules (`"09:05"`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FreqError;

pub const MINUTES_PER_HOUR: u32 = 60;

/// A wall-clock time of day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    /// Build a time, rejecting hour > 23 or minute > 59.
    pub fn checked(hour: u32, minute: u32) -> Result<Self, FreqError> {
        if hour > 23 || minute > 59 {
            return Err(FreqError::InvalidSchedule(format!(
                "time {}:{} is out of range",
                hour, minute
            )));
        }
        Ok(Self { hour, minute })
    }

    pub fn minutes_of_day(self) -> u32 {
        self.hour * MINUTES_PER_HOUR + self.minute
    }

    /// Unpadded run-time token, e.g. `"9:5"`.
    pub fn token(self) -> String {
        format!("{}:{}", self.hour, self.minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = FreqError;

    /// Accepts both `"HH:MM"` and `"H:M"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FreqError::InvalidSchedule(format!("invalid time '{}'", s));
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour = h.parse::<u32>().map_err(|_| invalid())?;
        let minute = m.parse::<u32>().map_err(|_| invalid())?;
        Self::checked(hour, minute)
    }
}

/// Serde adapter for hour/minute fields stored as two-digit strings (`"09"`).
///
/// Deserialization also accepts bare integers.
pub(crate) mod padded {
    use serde::{Deserialize, Deserializer, Serializer, de};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u32),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:02}", value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Num(n) => Ok(n),
            Raw::Text(s) => s
                .trim()
                .parse::<u32>()
                .map_err(|_| de::Error::custom(format!("expected a number, got '{}'", s))),
        }
    }
}
