//! Scheduling logic for calendar run frequencies.
//!
//! This module provides:
//! - **Expansion**: the run times a schedule produces on a qualifying day.
//! - **Conflict detection**: overlap of run times between schedules.
//! - **Allocation**: per-class schedule prefix ids and quota enforcement.
//! - **Duplicate detection**: exact-match rejection of re-entered schedules.
//! - **Disclosure**: dialog state rules for which fields are shown or disabled.
//!
//! # Example
//!
//! ```
//! use freqsched::domain::{ClockTime, FrequencySelector, IntervalSpec, ScheduleDraft};
//! use freqsched::scheduler::expand_tokens;
//!
//! let interval = IntervalSpec::starting_at(ClockTime::new(8, 0))
//!     .with_end(ClockTime::new(10, 0))
//!     .with_step(1, 0);
//! let draft = ScheduleDraft::new(FrequencySelector::Daily, ClockTime::new(8, 0)).with_interval(interval);
//!
//! assert_eq!(expand_tokens(&draft).unwrap(), vec!["8:0", "9:0", "10:0"]);
//! ```

mod allocate;
mod conflict;
mod disclosure;
mod duplicate;
mod expand;

pub use allocate::{DEFAULT_QUOTA_PER_CLASS, MAX_OFFSETS_PER_CLASS, allocate_prefix_id};
pub use conflict::{Conflict, conflicts, find_conflict, overlapping_times};
pub use disclosure::{
    ALL_MONTHS, BUSINESS_DAY, CALENDAR_DAY, DayRange, DisclosureState, MONTHS, VisibleSections, WEEK_DAYS,
    WEEKLY_RANGES,
};
pub use duplicate::{find_duplicate, is_duplicate};
pub use expand::{expand_submit_times, expand_tokens};
