//! Domain types for freqsched
//!
//! - Frequency: frequency classes and the selector values that fold into them
//! - HolidayAction: what a job does on holidays, in its compound string form
//! - ClockTime: time of day with padded and unpadded renderings
//! - Schedule: calendar schedule drafts and accepted schedules
//! - Triggers: dataset and job triggers held next to schedules

pub mod frequency;
pub mod holiday;
pub mod schedule;
pub mod time;
pub mod trigger;

pub use frequency::{FrequencyClass, FrequencySelector};
pub use holiday::{DoNotRunOption, HolidayAction, HolidayActionKind, RunOnHolidayOption};
pub use schedule::{IntervalSpec, RepeatType, Schedule, ScheduleDraft};
pub use time::ClockTime;
pub use trigger::{DatasetCondition, DatasetTrigger, JobStatusCondition, JobTrigger};
