//! Calendar schedule records.
//!
//! A `ScheduleDraft` is the user-entered definition; a `Schedule` is a draft
//! that has been accepted into the frequency store and given identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::frequency::{FrequencyClass, FrequencySelector};
use super::holiday::HolidayAction;
use super::time::{ClockTime, MINUTES_PER_HOUR, padded};
use crate::error::{FreqError, Result};

/// How an interval repeats inside its run window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatType {
    /// Fixed wall-clock cadence from the submit time
    Clock,
    /// Measured from the previous run's start
    Start,
    /// Measured from the previous run's end
    End,
}

/// Repeating run window after the base submit time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalSpec {
    #[serde(with = "padded")]
    pub start_hour: u32,
    #[serde(with = "padded")]
    pub start_minute: u32,
    #[serde(with = "padded")]
    pub end_hour: u32,
    #[serde(with = "padded")]
    pub end_minute: u32,
    pub repeat_type: RepeatType,
    #[serde(with = "padded")]
    pub step_hour: u32,
    #[serde(with = "padded")]
    pub step_minute: u32,
}

impl IntervalSpec {
    /// Default step when intervals are first switched on.
    pub const DEFAULT_STEP_MINUTES: u32 = 15;

    /// Interval pinned to `start` with an empty window and the default step.
    pub fn starting_at(start: ClockTime) -> Self {
        Self {
            start_hour: start.hour,
            start_minute: start.minute,
            end_hour: start.hour,
            end_minute: start.minute,
            repeat_type: RepeatType::Clock,
            step_hour: 0,
            step_minute: Self::DEFAULT_STEP_MINUTES,
        }
    }

    pub fn with_end(mut self, end: ClockTime) -> Self {
        self.end_hour = end.hour;
        self.end_minute = end.minute;
        self
    }

    pub fn with_step(mut self, hours: u32, minutes: u32) -> Self {
        self.step_hour = hours;
        self.step_minute = minutes;
        self
    }

    pub fn with_repeat(mut self, repeat_type: RepeatType) -> Self {
        self.repeat_type = repeat_type;
        self
    }

    pub fn start(&self) -> ClockTime {
        ClockTime::new(self.start_hour, self.start_minute)
    }

    pub fn end(&self) -> ClockTime {
        ClockTime::new(self.end_hour, self.end_minute)
    }

    pub fn step_minutes(&self) -> u32 {
        self.step_hour
            .saturating_mul(MINUTES_PER_HOUR)
            .saturating_add(self.step_minute)
    }
}

/// User-entered schedule definition, before identifiers are assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDraft {
    pub frequency: FrequencySelector,
    #[serde(with = "padded")]
    pub submit_hour: u32,
    #[serde(with = "padded")]
    pub submit_minute: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_action: Option<HolidayAction>,
    #[serde(default)]
    pub has_intervals: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<IntervalSpec>,
    #[serde(default)]
    pub run_days: Vec<String>,
    #[serde(default)]
    pub run_months: Vec<String>,
    #[serde(default)]
    pub run_occurrences: Vec<String>,
    #[serde(default)]
    pub holidays: Vec<String>,
}

impl ScheduleDraft {
    pub fn new(frequency: FrequencySelector, submit: ClockTime) -> Self {
        Self {
            frequency,
            submit_hour: submit.hour,
            submit_minute: submit.minute,
            holiday_action: None,
            has_intervals: false,
            interval: None,
            run_days: Vec::new(),
            run_months: Vec::new(),
            run_occurrences: Vec::new(),
            holidays: Vec::new(),
        }
    }

    /// Turn intervals on with the given window.
    pub fn with_interval(mut self, interval: IntervalSpec) -> Self {
        self.has_intervals = true;
        self.interval = Some(interval);
        self
    }

    pub fn with_holiday_action(mut self, action: HolidayAction) -> Self {
        self.holiday_action = Some(action);
        self
    }

    pub fn with_run_days<I, S>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.run_days = days.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_run_months<I, S>(mut self, months: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.run_months = months.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_holidays<I, S>(mut self, holidays: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.holidays = holidays.into_iter().map(Into::into).collect();
        self
    }

    pub fn submit_time(&self) -> ClockTime {
        ClockTime::new(self.submit_hour, self.submit_minute)
    }

    pub fn frequency_class(&self) -> FrequencyClass {
        self.frequency.class()
    }

    /// Check ranges and interval consistency.
    ///
    /// `min_step_minutes` of 0 only rejects zero-length steps.
    pub fn validate(&self, min_step_minutes: u32) -> Result<()> {
        ClockTime::checked(self.submit_hour, self.submit_minute)?;

        match (self.has_intervals, &self.interval) {
            (true, None) => {
                return Err(FreqError::InvalidSchedule(
                    "intervals are enabled but no interval is set".to_string(),
                ));
            }
            (false, Some(_)) => {
                return Err(FreqError::InvalidSchedule(
                    "interval is set but intervals are disabled".to_string(),
                ));
            }
            (true, Some(interval)) => {
                ClockTime::checked(interval.start_hour, interval.start_minute)?;
                ClockTime::checked(interval.end_hour, interval.end_minute)?;
                if interval.step_minute > 59 {
                    return Err(FreqError::InvalidSchedule(format!(
                        "interval step minute {} is out of range",
                        interval.step_minute
                    )));
                }
                let step = interval.step_minutes();
                if step == 0 {
                    return Err(FreqError::InvalidSchedule("interval step must not be zero".to_string()));
                }
                if step < min_step_minutes {
                    return Err(FreqError::InvalidSchedule(format!(
                        "interval step of {} minutes is below the minimum of {}",
                        step, min_step_minutes
                    )));
                }
            }
            (false, None) => {}
        }

        Ok(())
    }
}

/// A schedule accepted into the frequency store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Opaque unique identifier
    pub id: String,
    /// Class base plus sequence offset, e.g. "21"
    pub schedule_prefix_id: String,
    #[serde(flatten)]
    pub definition: ScheduleDraft,
    pub created_at: DateTime<Utc>,
}

impl Schedule {
    pub fn frequency_class(&self) -> FrequencyClass {
        self.definition.frequency_class()
    }

    pub fn submit_time(&self) -> ClockTime {
        self.definition.submit_time()
    }
}
