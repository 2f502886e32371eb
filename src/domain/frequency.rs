//! Frequency classes and the selector values that fold into them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FreqError;

/// Frequency class used for quota tracking and prefix id allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrequencyClass {
    Daily,
    Weekly,
    Monthly,
    Annually,
    HolidayBased,
}

impl FrequencyClass {
    /// Numeric base of the schedule prefix id.
    ///
    /// Holiday-based schedules have no base and cannot be allocated an id.
    pub fn prefix_base(self) -> Option<u32> {
        match self {
            FrequencyClass::Daily => Some(10),
            FrequencyClass::Weekly => Some(20),
            FrequencyClass::Monthly => Some(30),
            FrequencyClass::Annually => Some(40),
            FrequencyClass::HolidayBased => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FrequencyClass::Daily => "Daily",
            FrequencyClass::Weekly => "Weekly",
            FrequencyClass::Monthly => "Monthly",
            FrequencyClass::Annually => "Annually",
            FrequencyClass::HolidayBased => "HolidayBased",
        }
    }
}

impl fmt::Display for FrequencyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrequencyClass {
    type Err = FreqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Holiday selectors are accepted here and folded into their class
        FrequencySelector::from_str(s).map(FrequencySelector::class)
    }
}

/// Value chosen in the frequency dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FrequencySelector {
    Daily,
    Weekly,
    Monthly,
    Annually,
    OnHoliday,
    DayBeforeHoliday,
    DayAfterHoliday,
}

impl FrequencySelector {
    pub const ALL: [FrequencySelector; 7] = [
        FrequencySelector::Daily,
        FrequencySelector::Weekly,
        FrequencySelector::Monthly,
        FrequencySelector::Annually,
        FrequencySelector::OnHoliday,
        FrequencySelector::DayBeforeHoliday,
        FrequencySelector::DayAfterHoliday,
    ];

    pub fn class(self) -> FrequencyClass {
        match self {
            FrequencySelector::Daily => FrequencyClass::Daily,
            FrequencySelector::Weekly => FrequencyClass::Weekly,
            FrequencySelector::Monthly => FrequencyClass::Monthly,
            FrequencySelector::Annually => FrequencyClass::Annually,
            FrequencySelector::OnHoliday | FrequencySelector::DayBeforeHoliday | FrequencySelector::DayAfterHoliday => {
                FrequencyClass::HolidayBased
            }
        }
    }

    pub fn is_holiday_based(self) -> bool {
        self.class() == FrequencyClass::HolidayBased
    }

    pub fn label(self) -> &'static str {
        match self {
            FrequencySelector::Daily => "Daily",
            FrequencySelector::Weekly => "Weekly",
            FrequencySelector::Monthly => "Monthly",
            FrequencySelector::Annually => "Annually",
            FrequencySelector::OnHoliday => "On holiday",
            FrequencySelector::DayBeforeHoliday => "Day before holiday",
            FrequencySelector::DayAfterHoliday => "Day after holiday",
        }
    }
}

impl fmt::Display for FrequencySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowercase and drop separators so "Day before holiday", "day-before-holiday"
/// and "DayBeforeHoliday" compare equal.
fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for FrequencySelector {
    type Err = FreqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s.trim());
        if wanted == "holidaybased" || wanted == "holiday" {
            return Ok(FrequencySelector::OnHoliday);
        }
        Self::ALL
            .into_iter()
            .find(|sel| normalize_label(sel.label()) == wanted)
            .ok_or_else(|| FreqError::InvalidFrequency(s.to_string()))
    }
}

impl TryFrom<String> for FrequencySelector {
    type Error = FreqError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FrequencySelector> for String {
    fn from(value: FrequencySelector) -> Self {
        value.label().to_string()
    }
}
