//! Frequency store for one job-request session.
//!
//! - **FrequencyStore**: in-memory schedules, dataset triggers and job triggers
//! - **Session files**: JSONL snapshot so a session survives between CLI runs
//!
//! # Example
//!
//! ```
//! use freqsched::domain::{ClockTime, FrequencySelector, ScheduleDraft};
//! use freqsched::store::FrequencyStore;
//!
//! let mut store = FrequencyStore::new();
//! let first = store.add_schedule(ScheduleDraft::new(FrequencySelector::Weekly, ClockTime::new(9, 0)))?;
//! assert_eq!(first.schedule_prefix_id, "20");
//! # Ok::<(), freqsched::FreqError>(())
//! ```

mod frequency_store;
mod session;

pub use frequency_store::{FrequencyStore, StoreLimits};
pub use session::{SessionEntry, load_session, save_session};
