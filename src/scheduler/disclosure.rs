//! Form disclosure state for the calendar-schedule dialog.
//!
//! `DisclosureState` holds everything the dialog collects, including the
//! holiday-action branch and sub-option, and applies the rules that decide
//! which sections are shown, which options are disabled, and which stale
//! selections are cleared when a controlling field changes.

use serde::{Deserialize, Serialize};

use crate::domain::{
    ClockTime, FrequencyClass, FrequencySelector, HolidayAction, HolidayActionKind, IntervalSpec, RepeatType,
    ScheduleDraft,
};
use crate::error::{FreqError, Result};

pub const ALL_MONTHS: &str = "All months";
pub const BUSINESS_DAY: &str = "Business day";
pub const CALENDAR_DAY: &str = "Calendar day";

pub const WEEK_DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Named range of week days offered for weekly schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub label: &'static str,
    pub days: &'static [&'static str],
}

pub static WEEKLY_RANGES: [DayRange; 3] = [
    DayRange {
        label: "Sun-Sat",
        days: &WEEK_DAYS,
    },
    DayRange {
        label: "Mon-Fri",
        days: &["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"],
    },
    DayRange {
        label: "Sat-Sun",
        days: &["Saturday", "Sunday"],
    },
];

fn weekly_range(label: &str) -> Option<&'static DayRange> {
    WEEKLY_RANGES.iter().find(|r| r.label == label)
}

/// Which optional field groups the dialog shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibleSections {
    pub run_days: bool,
    pub run_months: bool,
    pub run_occurrences: bool,
    pub holidays: bool,
    pub holiday_action: bool,
    pub interval: bool,
}

/// Editable state of one calendar-schedule dialog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisclosureState {
    pub frequency: Option<FrequencySelector>,
    pub submit: ClockTime,
    pub holiday_action: Option<HolidayAction>,
    pub has_intervals: bool,
    pub interval: Option<IntervalSpec>,
    pub run_days: Vec<String>,
    pub run_months: Vec<String>,
    pub run_occurrences: Vec<String>,
    pub holidays: Vec<String>,
}

impl DisclosureState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an existing definition for editing.
    pub fn from_draft(draft: &ScheduleDraft) -> Self {
        Self {
            frequency: Some(draft.frequency),
            submit: draft.submit_time(),
            holiday_action: draft.holiday_action,
            has_intervals: draft.has_intervals,
            interval: draft.interval.clone(),
            run_days: draft.run_days.clone(),
            run_months: draft.run_months.clone(),
            run_occurrences: draft.run_occurrences.clone(),
            holidays: draft.holidays.clone(),
        }
    }

    fn class(&self) -> Option<FrequencyClass> {
        self.frequency.map(FrequencySelector::class)
    }

    /// Change the frequency, clearing every run list.
    ///
    /// Monthly starts out with all months selected. Re-selecting the current
    /// frequency changes nothing.
    pub fn select_frequency(&mut self, frequency: FrequencySelector) {
        if self.frequency == Some(frequency) {
            return;
        }

        self.frequency = Some(frequency);
        self.run_days.clear();
        self.run_months.clear();
        self.run_occurrences.clear();
        self.holidays.clear();

        if frequency == FrequencySelector::Monthly {
            self.run_months.push(ALL_MONTHS.to_string());
        }
        if frequency.is_holiday_based() {
            self.holiday_action = None;
        }
    }

    pub fn visible_sections(&self) -> VisibleSections {
        let Some(class) = self.class() else {
            return VisibleSections::default();
        };

        let mut sections = VisibleSections {
            interval: true,
            holiday_action: self.holiday_action_visible(),
            ..VisibleSections::default()
        };
        match class {
            FrequencyClass::Daily | FrequencyClass::Weekly => sections.run_days = true,
            FrequencyClass::Monthly => {
                sections.run_months = true;
                sections.run_days = true;
                sections.run_occurrences = true;
            }
            FrequencyClass::Annually => {
                sections.run_months = true;
                sections.run_occurrences = true;
            }
            FrequencyClass::HolidayBased => sections.holidays = true,
        }
        sections
    }

    /// Holiday handling is offered once a non-holiday frequency is chosen.
    pub fn holiday_action_visible(&self) -> bool {
        matches!(self.class(), Some(class) if class != FrequencyClass::HolidayBased)
    }

    /// Choose a holiday-action branch.
    ///
    /// Switching branch drops the other branch's sub-option. Returns false
    /// when the section is hidden.
    pub fn select_holiday_action(&mut self, kind: HolidayActionKind) -> bool {
        if !self.holiday_action_visible() {
            return false;
        }
        if self.holiday_action.map(|a| a.kind()) != Some(kind) {
            self.holiday_action = Some(HolidayAction::from_kind(kind));
        }
        true
    }

    /// Set branch and sub-option together, e.g. from `"do-not-run:onHoliday"`.
    pub fn set_holiday_action(&mut self, action: HolidayAction) -> bool {
        if !self.holiday_action_visible() {
            return false;
        }
        self.holiday_action = Some(action);
        true
    }

    pub fn clear_holiday_action(&mut self) {
        self.holiday_action = None;
    }

    /// Switch intervals on or off. Switching on pins the start to the submit time.
    pub fn toggle_intervals(&mut self, on: bool) {
        self.has_intervals = on;
        if on {
            if self.interval.is_none() {
                self.interval = Some(IntervalSpec::starting_at(self.submit));
            }
            self.sync_interval_start();
        } else {
            self.interval = None;
        }
    }

    pub fn set_submit_time(&mut self, submit: ClockTime) {
        self.submit = submit;
        self.sync_interval_start();
    }

    /// One-way copy of the submit time into the interval start.
    fn sync_interval_start(&mut self) {
        if !self.has_intervals {
            return;
        }
        if let Some(interval) = self.interval.as_mut() {
            interval.start_hour = self.submit.hour;
            interval.start_minute = self.submit.minute;
        }
    }

    fn interval_mut(&mut self) -> Option<&mut IntervalSpec> {
        if self.has_intervals { self.interval.as_mut() } else { None }
    }

    pub fn set_interval_end(&mut self, end: ClockTime) -> bool {
        self.interval_mut()
            .map(|interval| {
                interval.end_hour = end.hour;
                interval.end_minute = end.minute;
            })
            .is_some()
    }

    pub fn set_interval_step(&mut self, hours: u32, minutes: u32) -> bool {
        self.interval_mut()
            .map(|interval| {
                interval.step_hour = hours;
                interval.step_minute = minutes;
            })
            .is_some()
    }

    pub fn set_repeat_type(&mut self, repeat_type: RepeatType) -> bool {
        self.interval_mut()
            .map(|interval| interval.repeat_type = repeat_type)
            .is_some()
    }

    /// Run-day options that cannot be picked given the current selection.
    pub fn disabled_run_days(&self) -> Vec<&'static str> {
        match self.class() {
            Some(FrequencyClass::Weekly) => self.disabled_weekly_days(),
            Some(FrequencyClass::Monthly) => self.disabled_monthly_days(),
            _ => Vec::new(),
        }
    }

    // A selected range blocks every other range and the days it covers;
    // a selected day blocks nothing.
    fn disabled_weekly_days(&self) -> Vec<&'static str> {
        let selected: Vec<&DayRange> = self.run_days.iter().filter_map(|d| weekly_range(d)).collect();
        if selected.is_empty() {
            return Vec::new();
        }

        let mut disabled: Vec<&'static str> = WEEKLY_RANGES
            .iter()
            .filter(|r| !selected.iter().any(|s| s.label == r.label))
            .map(|r| r.label)
            .collect();
        disabled.extend(
            WEEK_DAYS
                .iter()
                .copied()
                .filter(|day| selected.iter().any(|r| r.days.contains(day))),
        );
        disabled
    }

    // Business day, calendar day and named weekdays are three exclusive families.
    fn disabled_monthly_days(&self) -> Vec<&'static str> {
        let has = |token: &str| self.run_days.iter().any(|d| d == token);
        let has_weekday = WEEK_DAYS.iter().any(|day| has(*day));

        let mut disabled = Vec::new();
        if has(BUSINESS_DAY) || has(CALENDAR_DAY) {
            disabled.extend(WEEK_DAYS);
        }
        if has(CALENDAR_DAY) || has_weekday {
            disabled.push(BUSINESS_DAY);
        }
        if has(BUSINESS_DAY) || has_weekday {
            disabled.push(CALENDAR_DAY);
        }
        disabled
    }

    /// Add a run-day token. Returns false if it is disabled or already chosen.
    pub fn select_run_day(&mut self, token: &str) -> bool {
        if self.disabled_run_days().iter().any(|d| *d == token) {
            return false;
        }
        push_unique(&mut self.run_days, token)
    }

    pub fn remove_run_day(&mut self, token: &str) -> bool {
        remove_token(&mut self.run_days, token)
    }

    /// Month options that cannot be picked given the current selection.
    pub fn disabled_run_months(&self) -> Vec<&'static str> {
        if self.run_months.iter().any(|m| m == ALL_MONTHS) {
            MONTHS.to_vec()
        } else {
            Vec::new()
        }
    }

    /// Add a month. "All months" replaces any individual months.
    pub fn select_run_month(&mut self, token: &str) -> bool {
        if token == ALL_MONTHS {
            if self.run_months.len() == 1 && self.run_months[0] == ALL_MONTHS {
                return false;
            }
            self.run_months = vec![ALL_MONTHS.to_string()];
            return true;
        }
        if self.disabled_run_months().iter().any(|m| *m == token) {
            return false;
        }
        push_unique(&mut self.run_months, token)
    }

    pub fn remove_run_month(&mut self, token: &str) -> bool {
        remove_token(&mut self.run_months, token)
    }

    pub fn select_run_occurrence(&mut self, token: &str) -> bool {
        push_unique(&mut self.run_occurrences, token)
    }

    pub fn remove_run_occurrence(&mut self, token: &str) -> bool {
        remove_token(&mut self.run_occurrences, token)
    }

    pub fn select_holiday(&mut self, token: &str) -> bool {
        push_unique(&mut self.holidays, token)
    }

    pub fn remove_holiday(&mut self, token: &str) -> bool {
        remove_token(&mut self.holidays, token)
    }

    /// Build the draft submitted from the dialog.
    ///
    /// Daily schedules with no run days default to the whole week here, not
    /// when the frequency is selected.
    pub fn to_draft(&self) -> Result<ScheduleDraft> {
        let frequency = self
            .frequency
            .ok_or_else(|| FreqError::InvalidSchedule("frequency not selected".to_string()))?;

        let mut run_days = self.run_days.clone();
        if frequency == FrequencySelector::Daily && run_days.is_empty() {
            run_days = WEEK_DAYS.iter().map(|d| d.to_string()).collect();
        }

        let holiday_action = if frequency.is_holiday_based() {
            None
        } else {
            self.holiday_action
        };

        Ok(ScheduleDraft {
            frequency,
            submit_hour: self.submit.hour,
            submit_minute: self.submit.minute,
            holiday_action,
            has_intervals: self.has_intervals,
            interval: if self.has_intervals { self.interval.clone() } else { None },
            run_days,
            run_months: self.run_months.clone(),
            run_occurrences: self.run_occurrences.clone(),
            holidays: self.holidays.clone(),
        })
    }
}

fn push_unique(list: &mut Vec<String>, token: &str) -> bool {
    if list.iter().any(|t| t == token) {
        return false;
    }
    list.push(token.to_string());
    true
}

fn remove_token(list: &mut Vec<String>, token: &str) -> bool {
    let before = list.len();
    list.retain(|t| t != token);
    list.len() != before
}
