//! Exact-duplicate detection.
//!
//! Stricter than time overlap: a draft is a duplicate only when frequency,
//! submit time, holiday action, intervals flag and every run list match.
//! Interval window details are not compared.

use crate::domain::{Schedule, ScheduleDraft};

/// Whether two drafts match on every compared field.
pub fn is_duplicate(a: &ScheduleDraft, b: &ScheduleDraft) -> bool {
    a.frequency == b.frequency
        && a.submit_hour == b.submit_hour
        && a.submit_minute == b.submit_minute
        && a.holiday_action == b.holiday_action
        && a.has_intervals == b.has_intervals
        && a.run_days == b.run_days
        && a.run_months == b.run_months
        && a.run_occurrences == b.run_occurrences
        && a.holidays == b.holidays
}

/// First existing schedule identical to the candidate.
pub fn find_duplicate<'a, I>(candidate: &ScheduleDraft, existing: I) -> Option<&'a Schedule>
where
    I: IntoIterator<Item = &'a Schedule>,
{
    existing.into_iter().find(|s| is_duplicate(candidate, &s.definition))
}
