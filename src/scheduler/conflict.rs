//! Conflict detection between schedules.
//!
//! Two schedules conflict when any of their expanded run times coincide.
//! Times are compared as minutes since midnight.

use std::collections::BTreeSet;

use crate::domain::{ClockTime, Schedule, ScheduleDraft};
use crate::error::{FreqError, Result};
use crate::scheduler::expand::expand_submit_times;

/// An existing schedule that overlaps a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// Opaque id of the existing schedule
    pub schedule_id: String,
    /// Prefix id of the existing schedule
    pub schedule_prefix_id: String,
    /// Shared run times, ascending
    pub times: Vec<ClockTime>,
}

impl From<Conflict> for FreqError {
    fn from(conflict: Conflict) -> Self {
        let time = conflict.times.first().map(|t| t.token()).unwrap_or_default();
        FreqError::ScheduleConflict {
            existing: conflict.schedule_prefix_id,
            time,
        }
    }
}

fn minute_set(draft: &ScheduleDraft) -> Result<BTreeSet<u32>> {
    Ok(expand_submit_times(draft)?
        .into_iter()
        .map(ClockTime::minutes_of_day)
        .collect())
}

fn from_minutes(minutes: u32) -> ClockTime {
    ClockTime::new(minutes / 60, minutes % 60)
}

/// Run times shared by both drafts, ascending.
pub fn overlapping_times(a: &ScheduleDraft, b: &ScheduleDraft) -> Result<Vec<ClockTime>> {
    let a = minute_set(a)?;
    let b = minute_set(b)?;
    Ok(a.intersection(&b).copied().map(from_minutes).collect())
}

/// Whether two drafts share any run time.
pub fn conflicts(a: &ScheduleDraft, b: &ScheduleDraft) -> Result<bool> {
    Ok(!overlapping_times(a, b)?.is_empty())
}

/// First existing schedule, in store order, that overlaps the candidate.
pub fn find_conflict<'a, I>(candidate: &ScheduleDraft, existing: I) -> Result<Option<Conflict>>
where
    I: IntoIterator<Item = &'a Schedule>,
{
    let wanted = minute_set(candidate)?;

    for schedule in existing {
        let theirs = minute_set(&schedule.definition)?;
        let shared: Vec<ClockTime> = wanted.intersection(&theirs).copied().map(from_minutes).collect();
        if !shared.is_empty() {
            return Ok(Some(Conflict {
                schedule_id: schedule.id.clone(),
                schedule_prefix_id: schedule.schedule_prefix_id.clone(),
                times: shared,
            }));
        }
    }

    Ok(None)
}
