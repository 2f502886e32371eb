//! Submit-time expansion.
//!
//! Produces every time of day a schedule runs on a qualifying day: the base
//! submit time, followed by the repeats of a clock-type interval up to and
//! including the interval end.

use crate::domain::time::MINUTES_PER_HOUR;
use crate::domain::{ClockTime, RepeatType, ScheduleDraft};
use crate::error::{FreqError, Result};

/// Expand a draft into its ordered run times.
///
/// Only `RepeatType::Clock` intervals add times; start- and end-relative
/// repeats are resolved by the executing engine, not here.
pub fn expand_submit_times(draft: &ScheduleDraft) -> Result<Vec<ClockTime>> {
    let base = ClockTime::checked(draft.submit_hour, draft.submit_minute)?;
    let mut times = vec![base];

    let interval = match &draft.interval {
        Some(interval) if draft.has_intervals && interval.repeat_type == RepeatType::Clock => interval,
        _ => return Ok(times),
    };

    let step = interval.step_minutes();
    if step == 0 {
        return Err(FreqError::InvalidSchedule("interval step must not be zero".to_string()));
    }

    // Repeats advance from the submit time, not from the interval start
    let end = ClockTime::checked(interval.end_hour, interval.end_minute)?.minutes_of_day();
    let mut current = base.minutes_of_day();
    while let Some(next) = current.checked_add(step).filter(|next| *next <= end) {
        times.push(ClockTime::new(next / MINUTES_PER_HOUR, next % MINUTES_PER_HOUR));
        current = next;
    }

    Ok(times)
}

/// Expanded run times as unpadded `"H:M"` tokens.
pub fn expand_tokens(draft: &ScheduleDraft) -> Result<Vec<String>> {
    Ok(expand_submit_times(draft)?.into_iter().map(ClockTime::token).collect())
}
