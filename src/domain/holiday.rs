//! Holiday handling choice attached to a schedule.
//!
//! Serialized as a single compound string `"<action>[:<subOption>]"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FreqError;

const RUN_ON_HOLIDAY: &str = "run-on-holiday";
const DO_NOT_RUN: &str = "do-not-run";

/// Sub-option for running a job around a holiday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunOnHolidayOption {
    DayBefore,
    DayAfter,
    OnHoliday,
}

impl RunOnHolidayOption {
    fn as_str(self) -> &'static str {
        match self {
            RunOnHolidayOption::DayBefore => "dayBeforeHoliday",
            RunOnHolidayOption::DayAfter => "dayAfterHoliday",
            RunOnHolidayOption::OnHoliday => "onHoliday",
        }
    }
}

/// Sub-option for skipping a job around a holiday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoNotRunOption {
    OnHoliday,
    AfterHoliday,
}

impl DoNotRunOption {
    fn as_str(self) -> &'static str {
        match self {
            DoNotRunOption::OnHoliday => "onHoliday",
            DoNotRunOption::AfterHoliday => "after-holiday",
        }
    }
}

/// Top-level branch of the holiday action, without its sub-option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HolidayActionKind {
    RunOnHoliday,
    DoNotRun,
}

/// What the job does when its run day falls on a holiday.
///
/// `None` sub-options mean the branch was chosen but no sub-option yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HolidayAction {
    RunOnHoliday(Option<RunOnHolidayOption>),
    DoNotRun(Option<DoNotRunOption>),
}

impl HolidayAction {
    pub fn kind(&self) -> HolidayActionKind {
        match self {
            HolidayAction::RunOnHoliday(_) => HolidayActionKind::RunOnHoliday,
            HolidayAction::DoNotRun(_) => HolidayActionKind::DoNotRun,
        }
    }

    /// Fresh action for a branch with no sub-option chosen.
    pub fn from_kind(kind: HolidayActionKind) -> Self {
        match kind {
            HolidayActionKind::RunOnHoliday => HolidayAction::RunOnHoliday(None),
            HolidayActionKind::DoNotRun => HolidayAction::DoNotRun(None),
        }
    }

    pub fn has_sub_option(&self) -> bool {
        match self {
            HolidayAction::RunOnHoliday(sub) => sub.is_some(),
            HolidayAction::DoNotRun(sub) => sub.is_some(),
        }
    }
}

impl fmt::Display for HolidayAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolidayAction::RunOnHoliday(None) => f.write_str(RUN_ON_HOLIDAY),
            HolidayAction::RunOnHoliday(Some(sub)) => write!(f, "{}:{}", RUN_ON_HOLIDAY, sub.as_str()),
            HolidayAction::DoNotRun(None) => f.write_str(DO_NOT_RUN),
            HolidayAction::DoNotRun(Some(sub)) => write!(f, "{}:{}", DO_NOT_RUN, sub.as_str()),
        }
    }
}

impl FromStr for HolidayAction {
    type Err = FreqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FreqError::InvalidSchedule(format!("unknown holiday action '{}'", s));
        let (action, sub) = match s.trim().split_once(':') {
            Some((action, sub)) => (action, Some(sub)),
            None => (s.trim(), None),
        };

        match action {
            RUN_ON_HOLIDAY => {
                let sub = match sub {
                    None => None,
                    Some("dayBeforeHoliday") => Some(RunOnHolidayOption::DayBefore),
                    Some("dayAfterHoliday") => Some(RunOnHolidayOption::DayAfter),
                    Some("onHoliday") => Some(RunOnHolidayOption::OnHoliday),
                    Some(_) => return Err(invalid()),
                };
                Ok(HolidayAction::RunOnHoliday(sub))
            }
            DO_NOT_RUN => {
                let sub = match sub {
                    None => None,
                    Some("onHoliday") => Some(DoNotRunOption::OnHoliday),
                    Some("after-holiday") => Some(DoNotRunOption::AfterHoliday),
                    Some(_) => return Err(invalid()),
                };
                Ok(HolidayAction::DoNotRun(sub))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for HolidayAction {
    type Error = FreqError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HolidayAction> for String {
    fn from(value: HolidayAction) -> Self {
        value.to_string()
    }
}
